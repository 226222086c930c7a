use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use entity::auth_user::UserRole;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{LoginDto, LoginUrlDto, PasswordChangeDto, TokenDto, UserDto, UserProfileDto},
    },
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, auth::CurrentUser, session::OAuthLoginState},
        service::{
            auth::{
                callback::CallbackService,
                login::login_service,
                password::LocalLoginService,
                token::{clear_session_cookie, issue_session_token, session_cookie},
            },
            user::ProfileService,
        },
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// Begin the Discord login flow
///
/// Mints a random state token, stores it in the short-lived session cookie
/// and hands the Discord authorize URL to the frontend.
#[utoipa::path(
    get,
    path = "/auth/discord",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authorize URL to redirect the user to", body = LoginUrlDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn discord_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let login = login_service(&state.discord);

    OAuthLoginState::insert(&session, &login.state).await?;

    Ok(Json(LoginUrlDto { url: login.url }))
}

/// Discord OAuth callback
///
/// Validates the echoed state against the stored one, completes the token
/// exchange and profile fetch, reconciles the auth account and member
/// profile, then issues the session cookie and redirects by role.
#[utoipa::path(
    get,
    path = "/auth/discord/callback",
    tag = AUTH_TAG,
    params(
        ("code" = String, Query, description = "Authorization code from Discord"),
        ("state" = String, Query, description = "State token echoed by Discord"),
    ),
    responses(
        (status = 307, description = "Login complete, redirect into the portal"),
        (status = 400, description = "State mismatch or OAuth failure", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn discord_callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<Response, Error> {
    // Single-use: the stored state is consumed no matter how the compare
    // turns out.
    let stored_state = OAuthLoginState::take(&session).await?;

    if stored_state != params.0.state {
        return Err(AuthError::CsrfValidationFailed.into());
    }

    let callback_service = CallbackService::new(&state.auth_db, &state.app_db, &state.discord);
    let user = callback_service.handle_callback(&params.0.code).await?;

    let destination = match user.role {
        UserRole::Admin => format!("{}/admin", state.frontend_url),
        UserRole::Member => format!("{}/user", state.frontend_url),
    };

    let token = issue_session_token(&state.jwt, &user)?;
    let cookie = session_cookie(&token, state.jwt.expiration_days());

    let mut response = Redirect::temporary(&destination).into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| Error::InternalError("invalid session cookie".to_string()))?,
    );

    Ok(response)
}

/// Local username/password login
///
/// Unknown usernames, wrong passwords and deactivated accounts all produce
/// the same generic 401.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Bearer token, also set as a cookie", body = TokenDto),
        (status = 401, description = "Authentication failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = LocalLoginService::new(&state.auth_db)
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    let token = issue_session_token(&state.jwt, &user)?;
    let cookie = session_cookie(&token, state.jwt.expiration_days());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenDto {
            access_token: token,
            token_type: "bearer".to_string(),
        }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto)
    ),
)]
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(MessageDto {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Current auth account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The authenticated account", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserDto> {
    Json(user.into())
}

/// Combined auth + member profile
#[utoipa::path(
    get,
    path = "/auth/user/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Combined profile across both stores", body = UserProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn user_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfileDto>, Error> {
    let profile = ProfileService::new(&state.app_db)
        .combined_profile(&user)
        .await?;

    Ok(Json(profile))
}

/// Change the local account password
#[utoipa::path(
    post,
    path = "/auth/change-password",
    tag = AUTH_TAG,
    request_body = PasswordChangeDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "No local password on this account", body = ErrorDto),
        (status = 401, description = "Wrong old password", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(change): Json<PasswordChangeDto>,
) -> Result<Json<MessageDto>, Error> {
    LocalLoginService::new(&state.auth_db)
        .change_password(user, &change.old_password, &change.new_password)
        .await?;

    Ok(Json(MessageDto {
        message: "Password changed successfully".to_string(),
    }))
}
