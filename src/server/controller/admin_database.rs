use std::collections::HashMap;

use axum::{extract::State, Json};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use serde::{Deserialize, Serialize};

use crate::{
    model::api::ErrorDto,
    server::{
        error::Error,
        model::{app::AppState, auth::RequireAdmin},
    },
};

pub static ADMIN_DATABASE_TAG: &str = "admin-database";

/// Connection report for one storage scope.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DatabaseStatusDto {
    pub database_name: String,
    pub connected: bool,
    pub tables_count: Option<i64>,
    pub error: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ConnectionTestDto {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConnectionTestResultDto {
    pub success: bool,
    pub error: Option<String>,
}

/// Status of both storage scopes
#[utoipa::path(
    get,
    path = "/admin/database/status",
    tag = ADMIN_DATABASE_TAG,
    responses(
        (status = 200, description = "Connection status per database", body = HashMap<String, DatabaseStatusDto>),
        (status = 403, description = "Admin access required", body = ErrorDto)
    ),
)]
pub async fn database_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<HashMap<String, DatabaseStatusDto>>, Error> {
    let mut statuses = HashMap::new();
    statuses.insert("app".to_string(), scope_status("app", &state.app_db).await);
    statuses.insert(
        "auth".to_string(),
        scope_status("auth", &state.auth_db).await,
    );

    Ok(Json(statuses))
}

/// Probe a database connection with supplied credentials
#[utoipa::path(
    post,
    path = "/admin/database/test-connection",
    tag = ADMIN_DATABASE_TAG,
    request_body = ConnectionTestDto,
    responses(
        (status = 200, description = "Probe outcome", body = ConnectionTestResultDto),
        (status = 403, description = "Admin access required", body = ErrorDto)
    ),
)]
pub async fn test_connection(
    RequireAdmin(_admin): RequireAdmin,
    Json(probe): Json<ConnectionTestDto>,
) -> Json<ConnectionTestResultDto> {
    let url = format!(
        "postgres://{}:{}@{}:{}/{}",
        probe.username, probe.password, probe.host, probe.port, probe.database
    );

    match Database::connect(url).await {
        Ok(connection) => {
            let _ = connection.close().await;
            Json(ConnectionTestResultDto {
                success: true,
                error: None,
            })
        }
        Err(err) => Json(ConnectionTestResultDto {
            success: false,
            error: Some(err.to_string()),
        }),
    }
}

async fn scope_status(name: &str, db: &DatabaseConnection) -> DatabaseStatusDto {
    match db.ping().await {
        Ok(()) => DatabaseStatusDto {
            database_name: name.to_string(),
            connected: true,
            tables_count: count_tables(db).await,
            error: None,
        },
        Err(err) => DatabaseStatusDto {
            database_name: name.to_string(),
            connected: false,
            tables_count: None,
            error: Some(err.to_string()),
        },
    }
}

/// Best-effort table count; `None` when the backend query fails.
async fn count_tables(db: &DatabaseConnection) -> Option<i64> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DbBackend::Postgres => {
            "SELECT COUNT(*) AS count FROM information_schema.tables WHERE table_schema = 'public'"
        }
        DbBackend::Sqlite => "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table'",
        _ => return None,
    };

    let row = db
        .query_one_raw(Statement::from_string(backend, sql))
        .await
        .ok()??;

    row.try_get::<i64>("", "count").ok()
}
