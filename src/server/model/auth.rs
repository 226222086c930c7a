//! Session credential model and authentication extractors.
//!
//! The session credential is a signed HS256 JWT carrying the local username,
//! role and optional Discord id, delivered either as the `access_token`
//! http-only cookie or as an `Authorization: Bearer` header. Extractors
//! resolve it back to a live auth account on every request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use entity::auth_user::UserRole;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

use crate::server::{
    data::auth::AuthUserRepository,
    error::{auth::AuthError, Error},
    model::app::AppState,
};

pub static ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Claims carried by the session token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// Local username of the account.
    pub sub: String,
    pub role: String,
    pub discord_id: Option<String>,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Signing and verification keys for session tokens, derived from the
/// `JWT_SECRET_KEY` environment variable at startup.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_days: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiration_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiration_days,
        }
    }

    pub fn expiration_days(&self) -> i64 {
        self.expiration_days
    }

    /// Mints a session token for the given account.
    pub fn encode(
        &self,
        user: &entity::auth_user::Model,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = (Utc::now() + chrono::Duration::days(self.expiration_days)).timestamp();
        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.to_value(),
            discord_id: user.discord_id.clone(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verifies a session token and returns its claims. Expired or tampered
    /// tokens fail verification.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

/// Extractor resolving the session credential to an active auth account.
///
/// Rejects with 401 when no credential is present, the token fails
/// verification, or the subject no longer exists or is deactivated.
pub struct CurrentUser(pub entity::auth_user::Model);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = credential_from_parts(parts).ok_or(AuthError::NotAuthenticated)?;
        let claims = state
            .jwt
            .decode(&token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user = AuthUserRepository::new(&state.auth_db)
            .get_by_username(&claims.sub)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidToken)?;

        Ok(CurrentUser(user))
    }
}

/// Extractor gating administrative operations; 403 for non-admin accounts.
pub struct RequireAdmin(pub entity::auth_user::Model);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            return Err(AuthError::AdminRequired.into());
        }

        Ok(RequireAdmin(user))
    }
}

/// Pulls the session token from the `access_token` cookie, falling back to
/// the `Authorization: Bearer` header.
fn credential_from_parts(parts: &Parts) -> Option<String> {
    let cookie_token = parts
        .headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == ACCESS_TOKEN_COOKIE).then(|| value.to_string())
            })
        });

    if cookie_token.is_some() {
        return cookie_token;
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> entity::auth_user::Model {
        entity::auth_user::Model {
            id: 1,
            discord_id: Some("123456789".to_string()),
            username: "picard".to_string(),
            discriminator: None,
            avatar: None,
            email: None,
            password_hash: None,
            role: UserRole::Member,
            rank_image: None,
            must_change_password: false,
            is_active: true,
            created_at: Utc::now().naive_utc(),
            last_login: None,
        }
    }

    /// Expect a minted token to decode back to the same claims
    #[test]
    fn token_round_trips_claims() {
        let keys = JwtKeys::new("test-secret", 7);
        let user = test_user();

        let token = keys.encode(&user).unwrap();
        let claims = keys.decode(&token).unwrap();

        assert_eq!(claims.sub, "picard");
        assert_eq!(claims.role, "member");
        assert_eq!(claims.discord_id, Some("123456789".to_string()));
    }

    /// Expect verification to fail with the wrong secret
    #[test]
    fn wrong_secret_fails_verification() {
        let keys = JwtKeys::new("test-secret", 7);
        let other_keys = JwtKeys::new("other-secret", 7);

        let token = keys.encode(&test_user()).unwrap();

        assert!(other_keys.decode(&token).is_err());
    }

    /// Expect a tampered token to fail verification
    #[test]
    fn tampered_token_fails_verification() {
        let keys = JwtKeys::new("test-secret", 7);
        let mut token = keys.encode(&test_user()).unwrap();
        token.push('x');

        assert!(keys.decode(&token).is_err());
    }
}
