use sea_orm::DatabaseConnection;

use crate::server::{model::auth::JwtKeys, scapi, service::auth::discord::DiscordClient};

/// Shared application state injected into every controller.
///
/// Holds one connection per storage scope: `app_db` for catalog, member,
/// fleet, squadron and content tables, `auth_db` for login accounts. The two
/// are linked only by the Discord id carried in both.
#[derive(Clone)]
pub struct AppState {
    pub app_db: DatabaseConnection,
    pub auth_db: DatabaseConnection,
    pub sc_client: scapi::Client,
    pub discord: DiscordClient,
    pub jwt: JwtKeys,
    pub frontend_url: String,
}
