use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Covers unknown username, wrong password and inactive account alike so
    /// responses cannot be used to enumerate accounts.
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Admin access required")]
    AdminRequired,
    #[error("Can only update your own profile")]
    NotProfileOwner,
    #[error("Cannot change your own role")]
    SelfRoleChange,
    #[error("Cannot delete your own account")]
    SelfDeactivation,
    #[error("Failed to login user due to OAuth state mismatch")]
    CsrfValidationFailed,
    #[error("Failed to login user due to OAuth state missing from session")]
    CsrfMissingValue,
    #[error("Failed to exchange authorization code with Discord: {0}")]
    TokenExchangeFailed(String),
    #[error("Failed to fetch Discord profile: {0}")]
    ProfileFetchFailed(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Cannot modify inactive user")]
    InactiveUser,
    #[error("Invalid role {0:?}, expected \"member\" or \"admin\"")]
    InvalidRole(String),
    #[error("Password change not available for Discord accounts")]
    NoLocalPassword,
    #[error("Incorrect old password")]
    WrongOldPassword,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::WrongOldPassword => StatusCode::UNAUTHORIZED,
            Self::NotAuthenticated | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::AdminRequired
            | Self::NotProfileOwner
            | Self::SelfRoleChange
            | Self::SelfDeactivation => StatusCode::FORBIDDEN,
            Self::CsrfValidationFailed
            | Self::CsrfMissingValue
            | Self::TokenExchangeFailed(_)
            | Self::ProfileFetchFailed(_)
            | Self::InactiveUser
            | Self::InvalidRole(_)
            | Self::NoLocalPassword => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = self.status();

        // The CSRF variants share one client-facing message so a forged
        // callback learns nothing about which check tripped.
        let error = match self {
            Self::CsrfValidationFailed | Self::CsrfMissingValue => {
                "There was an issue logging you in, please try again.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorDto { error })).into_response()
    }
}
