use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A payload item is unusable without this field; the item is counted as
    /// errored and the run moves on.
    #[error("Payload is missing required field {0:?}")]
    MissingField(&'static str),
    #[error("No data returned for organization {0}")]
    OrganizationNotFound(String),
    #[error("Organization {0} is not in the database, run the organization sync first")]
    OrganizationNotSynced(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::OrganizationNotFound(_) | Self::OrganizationNotSynced(_) => {
                StatusCode::NOT_FOUND
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
