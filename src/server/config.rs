use crate::server::error::config::ConfigError;

static DEFAULT_SC_API_BASE_URL: &str = "https://api.starcitizen-api.com";
static DEFAULT_JWT_EXPIRATION_DAYS: i64 = 7;

/// Environment-derived application configuration, read once at startup.
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub auth_database_url: String,
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_uri: String,
    pub sc_api_key: Option<String>,
    pub sc_api_base_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_days: i64,
    pub cors_allowed_origins: String,
    pub frontend_url: String,
    pub default_admin_username: String,
    pub default_admin_email: String,
    pub default_admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: optional("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            database_url: required("DATABASE_URL")?,
            auth_database_url: required("AUTH_DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_uri: required("DISCORD_REDIRECT_URI")?,
            sc_api_key: optional("SC_API_KEY"),
            sc_api_base_url: optional("SC_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SC_API_BASE_URL.to_string()),
            jwt_secret: required("JWT_SECRET_KEY")?,
            jwt_expiration_days: parsed("JWT_EXPIRATION_DAYS", DEFAULT_JWT_EXPIRATION_DAYS)?,
            cors_allowed_origins: optional("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            frontend_url: required("FRONTEND_URL")?,
            default_admin_username: optional("DEFAULT_ADMIN_USERNAME")
                .unwrap_or_else(|| "admin".to_string()),
            default_admin_email: optional("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|| "admin@stanton.local".to_string()),
            // No default on purpose: without an explicit password the admin
            // bootstrap is skipped with a warning.
            default_admin_password: optional("DEFAULT_ADMIN_PASSWORD"),
        })
    }

    /// Configuration for the sync CLI, which only needs the app database and
    /// the catalog API credentials.
    pub fn sync_from_env() -> Result<SyncConfig, ConfigError> {
        Ok(SyncConfig {
            database_url: required("DATABASE_URL")?,
            sc_api_key: optional("SC_API_KEY"),
            sc_api_base_url: optional("SC_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SC_API_BASE_URL.to_string()),
        })
    }
}

/// Subset of [`Config`] used by the `stanton-sync` binary.
pub struct SyncConfig {
    pub database_url: String,
    pub sc_api_key: Option<String>,
    pub sc_api_base_url: String,
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parsed(name: &str, default: i64) -> Result<i64, ConfigError> {
    match optional(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidEnvValue {
            var: name.to_string(),
            reason: format!("expected an integer, got {raw:?}"),
        }),
        None => Ok(default),
    }
}
