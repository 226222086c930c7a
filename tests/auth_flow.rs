//! Controller-level tests for the login flows: CSRF state validation on
//! the Discord callback, session cookie issuance, role-based redirects and
//! the credential extractors.

use axum::{
    extract::{FromRequestParts, Query, State},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    Json,
};
use entity::auth_user::UserRole;
use stanton::{
    model::auth::{LoginDto, TokenDto},
    server::{
        controller::auth::{discord_callback, login, CallbackParams},
        data::{auth::AuthUserRepository, member::MemberRepository},
        model::{
            app::AppState,
            auth::{CurrentUser, JwtKeys, RequireAdmin},
            session::OAuthLoginState,
        },
        scapi,
        service::auth::{discord::DiscordClient, password::hash_password},
    },
};
use stanton_test_utils::prelude::*;

static TEST_JWT_SECRET: &str = "integration-test-secret";
static TEST_FRONTEND_URL: &str = "https://portal.example";

fn app_state(test: &TestSetup) -> AppState {
    let base = test.server.url();

    let discord = DiscordClient::builder()
        .client_id(stanton_test_utils::constant::TEST_DISCORD_CLIENT_ID)
        .client_secret(stanton_test_utils::constant::TEST_DISCORD_CLIENT_SECRET)
        .redirect_uri(stanton_test_utils::constant::TEST_DISCORD_REDIRECT_URI)
        .api_base(&base)
        .authorize_url(&format!("{base}/oauth2/authorize"))
        .token_url(&format!("{base}/oauth2/token"))
        .build()
        .unwrap();

    let sc_client = scapi::Client::builder()
        .base_url(&base)
        .api_key(stanton_test_utils::constant::TEST_SC_API_KEY)
        .build()
        .unwrap();

    AppState {
        app_db: test.app_db.clone(),
        auth_db: test.auth_db.clone(),
        sc_client,
        discord,
        jwt: JwtKeys::new(TEST_JWT_SECRET, 7),
        frontend_url: TEST_FRONTEND_URL.to_string(),
    }
}

async fn auth_rows(test: &TestSetup) -> (u64, bool) {
    let (_, total) = AuthUserRepository::new(&test.auth_db)
        .list(&stanton::server::data::auth::user::UserListFilter {
            page: 1,
            limit: 100,
            role: None,
            search: None,
        })
        .await
        .unwrap();

    let member = MemberRepository::new(&test.app_db)
        .get_by_discord_id("42")
        .await
        .unwrap();

    (total, member.is_some())
}

/// Expect a callback with a state that does not match the stored one to be
/// rejected with no identity created in either store
#[tokio::test]
async fn callback_rejects_state_mismatch() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    OAuthLoginState::insert(&test.session, "expected_state")
        .await
        .unwrap();

    let params = CallbackParams {
        state: "forged_state".to_string(),
        code: "code".to_string(),
    };

    let result = discord_callback(State(state), test.session.clone(), Query(params)).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (users, member_exists) = auth_rows(&test).await;
    assert_eq!(users, 0);
    assert!(!member_exists);

    Ok(())
}

/// Expect a callback without any stored state to be rejected the same way
#[tokio::test]
async fn callback_rejects_missing_state() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    let params = CallbackParams {
        state: "anything".to_string(),
        code: "code".to_string(),
    };

    let result = discord_callback(State(state), test.session.clone(), Query(params)).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (users, member_exists) = auth_rows(&test).await;
    assert_eq!(users, 0);
    assert!(!member_exists);

    Ok(())
}

/// Expect a matching state to complete the login: both records created,
/// session cookie set, redirect to the member surface
#[tokio::test]
async fn callback_success_sets_cookie_and_redirects() -> Result<(), TestError> {
    let mut test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    mock_discord_token(&mut test.server);
    mock_discord_profile(&mut test.server, &factory::discord_profile_payload("42", "kirk"));

    OAuthLoginState::insert(&test.session, "good_state")
        .await
        .unwrap();

    let params = CallbackParams {
        state: "good_state".to_string(),
        code: "auth_code".to_string(),
    };

    let response = discord_callback(State(state), test.session.clone(), Query(params))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(location, format!("{TEST_FRONTEND_URL}/user"));

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let (users, member_exists) = auth_rows(&test).await;
    assert_eq!(users, 1);
    assert!(member_exists);

    // The state is single-use; replaying the callback is rejected.
    let replay = discord_callback(
        State(app_state(&test)),
        test.session.clone(),
        Query(CallbackParams {
            state: "good_state".to_string(),
            code: "auth_code".to_string(),
        }),
    )
    .await
    .into_response();
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect an admin account logging in via Discord to land on the admin
/// surface
#[tokio::test]
async fn callback_redirects_admins_to_admin_surface() -> Result<(), TestError> {
    let mut test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    // Pre-existing admin bound to this Discord id.
    let repo = AuthUserRepository::new(&test.auth_db);
    let user = repo
        .create_from_discord(&stanton::server::service::auth::discord::DiscordProfile {
            id: "42".to_string(),
            username: "kirk".to_string(),
            discriminator: None,
            avatar: None,
            email: None,
        })
        .await?;
    repo.update_role(user, UserRole::Admin).await?;

    mock_discord_token(&mut test.server);
    mock_discord_profile(&mut test.server, &factory::discord_profile_payload("42", "kirk"));

    OAuthLoginState::insert(&test.session, "good_state")
        .await
        .unwrap();

    let response = discord_callback(
        State(state),
        test.session.clone(),
        Query(CallbackParams {
            state: "good_state".to_string(),
            code: "auth_code".to_string(),
        }),
    )
    .await
    .into_response();

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, format!("{TEST_FRONTEND_URL}/admin"));

    Ok(())
}

/// Expect local login to return a bearer token that the extractor accepts
#[tokio::test]
async fn local_login_issues_usable_token() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    let hash = hash_password("hunter2").unwrap();
    AuthUserRepository::new(&test.auth_db)
        .create_local("admin", "admin@example.com", &hash, UserRole::Admin, false)
        .await?;

    let response = login(
        State(state.clone()),
        Json(LoginDto {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let token: TokenDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(token.token_type, "bearer");

    // The issued token authenticates a request via the bearer header.
    let request = Request::builder()
        .uri("/auth/me")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token.access_token),
        )
        .body(())
        .unwrap();
    let (mut parts, ()) = request.into_parts();

    let current = CurrentUser::from_request_parts(&mut parts, &state).await;
    assert!(current.is_ok());

    let admin_guard = {
        let request = Request::builder()
            .uri("/admin/users")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.access_token),
            )
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();
        RequireAdmin::from_request_parts(&mut parts, &state).await
    };
    assert!(admin_guard.is_ok());

    Ok(())
}

/// Expect unknown-user and wrong-password logins to be indistinguishable
/// at the HTTP layer
#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    let hash = hash_password("hunter2").unwrap();
    AuthUserRepository::new(&test.auth_db)
        .create_local("admin", "admin@example.com", &hash, UserRole::Admin, false)
        .await?;

    let unknown = login(
        State(state.clone()),
        Json(LoginDto {
            username: "nobody".to_string(),
            password: "hunter2".to_string(),
        }),
    )
    .await
    .into_response();

    let wrong = login(
        State(state),
        Json(LoginDto {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown_body = axum::body::to_bytes(unknown.into_body(), usize::MAX)
        .await
        .unwrap();
    let wrong_body = axum::body::to_bytes(wrong.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(unknown_body, wrong_body);

    Ok(())
}

/// Expect member-role tokens to be rejected by the admin guard
#[tokio::test]
async fn member_tokens_fail_the_admin_guard() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    let user = AuthUserRepository::new(&test.auth_db)
        .create_from_discord(&stanton::server::service::auth::discord::DiscordProfile {
            id: "42".to_string(),
            username: "kirk".to_string(),
            discriminator: None,
            avatar: None,
            email: None,
        })
        .await?;
    let token = state.jwt.encode(&user).unwrap();

    let request = Request::builder()
        .uri("/admin/users")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(())
        .unwrap();
    let (mut parts, ()) = request.into_parts();

    let guard = RequireAdmin::from_request_parts(&mut parts, &state).await;
    let response = match guard {
        Ok(_) => panic!("member token passed the admin guard"),
        Err(err) => err.into_response(),
    };
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a token for a deactivated account to stop authenticating
#[tokio::test]
async fn deactivated_accounts_lose_access() -> Result<(), TestError> {
    let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
    let state = app_state(&test);

    let repo = AuthUserRepository::new(&test.auth_db);
    let user = repo
        .create_from_discord(&stanton::server::service::auth::discord::DiscordProfile {
            id: "42".to_string(),
            username: "kirk".to_string(),
            discriminator: None,
            avatar: None,
            email: None,
        })
        .await?;
    let token = state.jwt.encode(&user).unwrap();
    repo.deactivate(user).await?;

    let request = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(())
        .unwrap();
    let (mut parts, ()) = request.into_parts();

    let current = CurrentUser::from_request_parts(&mut parts, &state).await;
    assert!(current.is_err());

    Ok(())
}
