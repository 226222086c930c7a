use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Listing order for published posts.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BlogSort {
    Newest,
    Oldest,
}

pub struct BlogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlogRepository<'a> {
    /// Creates a new instance of [`BlogRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Published posts only, paginated.
    pub async fn list_published(
        &self,
        page: u64,
        limit: u64,
        sort: BlogSort,
    ) -> Result<(Vec<entity::blog_post::Model>, u64), DbErr> {
        let query = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Published.eq(true));

        let total = query.clone().count(self.db).await?;

        let query = match sort {
            BlogSort::Newest => query.order_by_desc(entity::blog_post::Column::CreatedAt),
            BlogSort::Oldest => query.order_by_asc(entity::blog_post::Column::CreatedAt),
        };

        let posts = query
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok((posts, total))
    }

    /// Every post including drafts, for the admin surface.
    pub async fn list_all(&self) -> Result<Vec<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .order_by_desc(entity::blog_post::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        excerpt: &str,
        author: &str,
        published: bool,
    ) -> Result<entity::blog_post::Model, DbErr> {
        let post = entity::blog_post::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            content: ActiveValue::Set(content.to_string()),
            excerpt: ActiveValue::Set(excerpt.to_string()),
            author: ActiveValue::Set(author.to_string()),
            published: ActiveValue::Set(published),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    pub async fn update(
        &self,
        post: entity::blog_post::Model,
        title: Option<&str>,
        content: Option<&str>,
        excerpt: Option<&str>,
        published: Option<bool>,
    ) -> Result<entity::blog_post::Model, DbErr> {
        let mut post: entity::blog_post::ActiveModel = post.into();

        if let Some(title) = title {
            post.title = ActiveValue::Set(title.to_string());
        }
        if let Some(content) = content {
            post.content = ActiveValue::Set(content.to_string());
        }
        if let Some(excerpt) = excerpt {
            post.excerpt = ActiveValue::Set(excerpt.to_string());
        }
        if let Some(published) = published {
            post.published = ActiveValue::Set(published);
        }
        post.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        post.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::BlogPost::delete_by_id(id).exec(self.db).await
    }
}
