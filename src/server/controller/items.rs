use axum::{extract::State, http::StatusCode, Json};

use crate::{
    model::content::{ItemDto, ItemInDto},
    server::{data::content::ItemRepository, error::Error, model::app::AppState},
};

pub static ITEMS_TAG: &str = "items";

/// List items
#[utoipa::path(
    get,
    path = "/items",
    tag = ITEMS_TAG,
    responses(
        (status = 200, description = "All items, newest first", body = Vec<ItemDto>)
    ),
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ItemDto>>, Error> {
    let items = ItemRepository::new(&state.app_db).list().await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Create an item
#[utoipa::path(
    post,
    path = "/items",
    tag = ITEMS_TAG,
    request_body = ItemInDto,
    responses(
        (status = 201, description = "Created item", body = ItemDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemInDto>,
) -> Result<(StatusCode, Json<ItemDto>), Error> {
    let item = ItemRepository::new(&state.app_db)
        .create(&payload.title)
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}
