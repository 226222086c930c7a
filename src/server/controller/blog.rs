use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        content::{BlogPostCreateDto, BlogPostDto, BlogPostListDto, BlogPostUpdateDto},
    },
    server::{
        data::content::BlogRepository,
        error::Error,
        model::{app::AppState, auth::RequireAdmin},
        service::content::BlogService,
    },
};

pub static BLOG_TAG: &str = "blog";

#[derive(Deserialize)]
pub struct BlogListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
}

/// Published blog posts, paginated
#[utoipa::path(
    get,
    path = "/api/blog",
    tag = BLOG_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Posts per page, max 50"),
        ("sort" = Option<String>, Query, description = "newest or oldest"),
    ),
    responses(
        (status = 200, description = "Published posts", body = BlogPostListDto)
    ),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> Result<Json<BlogPostListDto>, Error> {
    let (posts, total, page, pages) = BlogService::new(&state.app_db)
        .list_published(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(10),
            params.sort.as_deref().unwrap_or("newest"),
        )
        .await?;

    let limit = params.limit.unwrap_or(10).clamp(1, 50);

    Ok(Json(BlogPostListDto {
        posts: posts.into_iter().map(Into::into).collect(),
        total,
        page,
        limit,
        pages,
    }))
}

/// One published post by slug
#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    tag = BLOG_TAG,
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post", body = BlogPostDto),
        (status = 404, description = "No published post with this slug", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostDto>, Error> {
    let post = BlogService::new(&state.app_db)
        .get_published_by_slug(&slug)
        .await?;

    Ok(Json(post.into()))
}

/// All posts including drafts (admin)
#[utoipa::path(
    get,
    path = "/api/admin/blog",
    tag = BLOG_TAG,
    responses(
        (status = 200, description = "Every post", body = Vec<BlogPostDto>),
        (status = 403, description = "Admin access required", body = ErrorDto)
    ),
)]
pub async fn list_all_posts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<BlogPostDto>>, Error> {
    let posts = BlogRepository::new(&state.app_db).list_all().await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Create a post (admin)
#[utoipa::path(
    post,
    path = "/api/admin/blog",
    tag = BLOG_TAG,
    request_body = BlogPostCreateDto,
    responses(
        (status = 201, description = "Created post", body = BlogPostDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 409, description = "Duplicate slug", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(create): Json<BlogPostCreateDto>,
) -> Result<(StatusCode, Json<BlogPostDto>), Error> {
    let post = BlogService::new(&state.app_db).create_post(&create).await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Update a post (admin)
#[utoipa::path(
    put,
    path = "/api/admin/blog/{post_id}",
    tag = BLOG_TAG,
    params(("post_id" = i32, Path, description = "Post id")),
    request_body = BlogPostUpdateDto,
    responses(
        (status = 200, description = "Updated post", body = BlogPostDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<i32>,
    Json(update): Json<BlogPostUpdateDto>,
) -> Result<Json<BlogPostDto>, Error> {
    let post = BlogService::new(&state.app_db)
        .update_post(post_id, &update)
        .await?;

    Ok(Json(post.into()))
}

/// Delete a post (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/blog/{post_id}",
    tag = BLOG_TAG,
    params(("post_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Deleted", body = MessageDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<i32>,
) -> Result<Json<MessageDto>, Error> {
    BlogService::new(&state.app_db).delete_post(post_id).await?;

    Ok(Json(MessageDto {
        message: "Blog post deleted".to_string(),
    }))
}
