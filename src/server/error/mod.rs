//! Error types for the Stanton server application.
//!
//! Domain-specific error enums (authentication, configuration, catalog
//! sync, squadron and content management) are aggregated into a single
//! [`Error`] type. All errors implement `IntoResponse` for Axum HTTP
//! responses and use `thiserror` for the `Display`/`Error` derives.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod content;
pub mod squadron;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, catalog::CatalogError, config::ConfigError, content::ContentError,
        squadron::SquadronError,
    },
};

/// Main error type for the Stanton server application.
///
/// Aggregates the domain-specific error types and external library errors
/// into a single unified error type, with `#[from]` conversions so `?` works
/// everywhere. The `IntoResponse` implementation maps errors to appropriate
/// HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (credentials, tokens, OAuth state, permissions).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Catalog synchronization error (payload validation, missing parents).
    #[error(transparent)]
    CatalogError(#[from] CatalogError),
    /// Squadron membership error (capacity, recruiting state).
    #[error(transparent)]
    SquadronError(#[from] SquadronError),
    /// Content management error (blog slugs, missing posts).
    #[error(transparent)]
    ContentError(#[from] ContentError),
    /// Star Citizen API client error (transport, upstream envelope).
    #[error(transparent)]
    ScApiError(#[from] crate::server::scapi::ScApiError),
    /// Database error (query failures, connection issues, constraints).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// JWT encoding error. Decoding failures are mapped to
    /// [`AuthError::InvalidToken`] before they reach this variant.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Stanton's code.
    #[error("Internal error with Stanton's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::CatalogError(err) => err.into_response(),
            Self::SquadronError(err) => err.into_response(),
            Self::ContentError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error message for debugging but returns a generic body so
/// implementation details are not exposed to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
