use axum::Json;

use crate::model::api::HealthDto;

pub static META_TAG: &str = "meta";

/// Service liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = META_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        service: "stanton".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
