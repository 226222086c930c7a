use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::blog_post::Model> for BlogPostDto {
    fn from(post: entity::blog_post::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            author: post.author,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostListDto {
    pub posts: Vec<BlogPostDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostCreateDto {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: String,
    pub published: bool,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostUpdateDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemDto {
    pub id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
}

impl From<entity::item::Model> for ItemDto {
    fn from(item: entity::item::Model) -> Self {
        Self {
            id: item.id,
            title: item.title,
            created_at: item.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemInDto {
    pub title: String,
}
