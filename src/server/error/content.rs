use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Blog post not found")]
    PostNotFound,
    #[error("A blog post with slug {0:?} already exists")]
    DuplicateSlug(String),
    #[error("Blog post title cannot be empty")]
    EmptyTitle,
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::PostNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateSlug(_) => StatusCode::CONFLICT,
            Self::EmptyTitle => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
