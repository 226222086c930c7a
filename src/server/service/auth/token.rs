//! Session token issuance and cookie assembly.

use crate::server::{
    error::Error,
    model::auth::{JwtKeys, ACCESS_TOKEN_COOKIE},
};

/// Mints the signed session token for an account.
pub fn issue_session_token(
    jwt: &JwtKeys,
    user: &entity::auth_user::Model,
) -> Result<String, Error> {
    let token = jwt.encode(user)?;

    Ok(token)
}

/// Builds the `Set-Cookie` value delivering the session token: http-only,
/// SameSite=Strict, expiring with the token itself.
pub fn session_cookie(token: &str, expiration_days: i64) -> String {
    let max_age = expiration_days * 24 * 60 * 60;

    format!("{ACCESS_TOKEN_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}")
}

/// Builds the `Set-Cookie` value that clears the session cookie on logout.
pub fn clear_session_cookie() -> String {
    format!("{ACCESS_TOKEN_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect the session cookie to be http-only, same-site strict and
    /// bounded by the token lifetime
    #[test]
    fn session_cookie_carries_security_attributes() {
        let cookie = session_cookie("token123", 7);

        assert!(cookie.starts_with("access_token=token123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    /// Expect the clearing cookie to expire immediately
    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();

        assert!(cookie.starts_with("access_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
