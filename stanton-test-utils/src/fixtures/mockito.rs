//! Mock endpoints for the Discord OAuth flow.

use mockito::{Mock, ServerGuard};

/// Mocks a successful token exchange at `POST /oauth2/token`.
pub fn mock_discord_token(server: &mut ServerGuard) -> Mock {
    let body = serde_json::json!({
        "access_token": "discord_access_token",
        "token_type": "Bearer",
        "expires_in": 604800,
        "scope": "identify email",
    });

    server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

/// Mocks the profile fetch at `GET /users/@me` with the given payload.
pub fn mock_discord_profile(server: &mut ServerGuard, profile: &serde_json::Value) -> Mock {
    server
        .mock("GET", "/users/@me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile.to_string())
        .create()
}
