use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum SquadronError {
    #[error("Squadron not found")]
    NotFound,
    #[error("Squadron is not accepting new members")]
    NotRecruiting,
    #[error("Squadron is at capacity")]
    Full,
    #[error("Already an active member of this squadron")]
    AlreadyMember,
    #[error("Not an active member of this squadron")]
    NotAMember,
}

impl IntoResponse for SquadronError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotRecruiting | Self::Full | Self::AlreadyMember | Self::NotAMember => {
                StatusCode::CONFLICT
            }
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
