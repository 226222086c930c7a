//! Process startup helpers: tracing, database connections, migrations,
//! client construction, session/CORS layers and the default-admin seed.

use axum::http::{header, HeaderValue, Method};
use migration::{AppMigrator, AuthMigrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

use crate::server::{
    config::Config,
    data::auth::AuthUserRepository,
    error::Error,
    scapi,
    service::auth::{discord::DiscordClient, password::hash_password},
};

/// Initializes the tracing subscriber, honoring `RUST_LOG` with an info
/// default.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Connect to the app database and run its migrations
pub async fn connect_to_app_database(database_url: &str) -> Result<DatabaseConnection, Error> {
    let db = connect(database_url).await?;

    AppMigrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to the auth database and run its migrations
pub async fn connect_to_auth_database(database_url: &str) -> Result<DatabaseConnection, Error> {
    let db = connect(database_url).await?;

    AuthMigrator::up(&db, None).await?;

    Ok(db)
}

async fn connect(database_url: &str) -> Result<DatabaseConnection, Error> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;

    Ok(db)
}

/// Build the Star Citizen API client; a missing key yields a disabled
/// client with a warning rather than a startup failure.
pub fn build_sc_client(config: &Config) -> Result<scapi::Client, Error> {
    let client = scapi::Client::builder()
        .base_url(&config.sc_api_base_url)
        .maybe_api_key(config.sc_api_key.clone())
        .build()?;

    if !client.is_enabled() {
        tracing::warn!(
            "SC_API_KEY is not set; catalog synchronization is disabled until it is configured"
        );
    }

    Ok(client)
}

/// Build and configure the Discord OAuth client with the provided
/// credentials
pub fn build_discord_client(config: &Config) -> Result<DiscordClient, Error> {
    DiscordClient::builder()
        .client_id(&config.discord_client_id)
        .client_secret(&config.discord_client_secret)
        .redirect_uri(&config.discord_redirect_uri)
        .build()
}

/// Session layer backing the short-lived OAuth state cookie. The session
/// only ever holds that state token, so an in-memory store and a tight
/// expiry are enough.
pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    use time::Duration;

    let development_mode = cfg!(debug_assertions);
    let secure_cookies = !development_mode;

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(10)))
}

/// CORS layer allowing the configured frontend origins with credentials.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Ensures the default admin account exists.
///
/// Skipped with a warning when no bootstrap password is configured; the
/// created account must change its password on first login.
pub async fn seed_default_admin(
    config: &Config,
    auth_db: &DatabaseConnection,
) -> Result<(), Error> {
    let user_repo = AuthUserRepository::new(auth_db);

    if user_repo
        .get_by_username(&config.default_admin_username)
        .await?
        .is_some()
    {
        tracing::info!(
            username = %config.default_admin_username,
            "default admin already exists"
        );
        return Ok(());
    }

    let Some(password) = &config.default_admin_password else {
        tracing::warn!(
            "DEFAULT_ADMIN_PASSWORD is not set; skipping default admin bootstrap"
        );
        return Ok(());
    };

    let password_hash = hash_password(password)?;
    user_repo
        .create_local(
            &config.default_admin_username,
            &config.default_admin_email,
            &password_hash,
            entity::auth_user::UserRole::Admin,
            true,
        )
        .await?;

    tracing::info!(
        username = %config.default_admin_username,
        "default admin created, password must be changed on first login"
    );

    Ok(())
}
