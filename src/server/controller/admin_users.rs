use axum::{
    extract::{Path, Query, State},
    Json,
};
use entity::auth_user::UserRole;
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{RankUpdateDto, RoleUpdateDto, UserDto, UserListDto},
    },
    server::{
        data::auth::user::UserListFilter,
        error::{auth::AuthError, Error},
        model::{app::AppState, auth::RequireAdmin},
        service::user::AdminUserService,
    },
};

pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct UserListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub role: Option<String>,
    pub search: Option<String>,
}

fn parse_role(raw: &str) -> Result<UserRole, Error> {
    match raw {
        "member" => Ok(UserRole::Member),
        "admin" => Ok(UserRole::Admin),
        other => Err(AuthError::InvalidRole(other.to_string()).into()),
    }
}

/// List users with pagination, role filter and search
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Users per page, max 100"),
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("search" = Option<String>, Query, description = "Search username, email or Discord id"),
    ),
    responses(
        (status = 200, description = "Paginated user listing", body = UserListDto),
        (status = 403, description = "Admin access required", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> Result<Json<UserListDto>, Error> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let role = params.role.as_deref().map(parse_role).transpose()?;

    let filter = UserListFilter {
        page,
        limit,
        role,
        search: params.search,
    };

    let (users, total) = AdminUserService::new(&state.auth_db, &state.app_db)
        .list_users(&filter)
        .await?;

    let pages = match total {
        0 => 1,
        total => total.div_ceil(limit),
    };

    Ok(Json(UserListDto {
        users: users.into_iter().map(Into::into).collect(),
        total,
        page,
        limit,
        pages,
    }))
}

/// Change a user's role
///
/// Self-protection: an admin cannot change their own role.
#[utoipa::path(
    put,
    path = "/admin/users/{user_id}/role",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Target user id")),
    request_body = RoleUpdateDto,
    responses(
        (status = 200, description = "Updated account", body = UserDto),
        (status = 400, description = "Invalid role or inactive target", body = ErrorDto),
        (status = 403, description = "Admin required or self-change rejected", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(acting_user): RequireAdmin,
    Path(user_id): Path<i32>,
    Json(update): Json<RoleUpdateDto>,
) -> Result<Json<UserDto>, Error> {
    let role = parse_role(&update.role)?;

    let updated = AdminUserService::new(&state.auth_db, &state.app_db)
        .update_role(acting_user.id, user_id, role)
        .await?;

    Ok(Json(updated.into()))
}

/// Change a user's rank label and rank image
///
/// Writes the image to the auth account and the label to the member
/// profile when one exists.
#[utoipa::path(
    put,
    path = "/admin/users/{user_id}/rank",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Target user id")),
    request_body = RankUpdateDto,
    responses(
        (status = 200, description = "Updated account", body = UserDto),
        (status = 400, description = "Inactive target", body = ErrorDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn update_user_rank(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<i32>,
    Json(update): Json<RankUpdateDto>,
) -> Result<Json<UserDto>, Error> {
    let updated = AdminUserService::new(&state.auth_db, &state.app_db)
        .update_rank(user_id, &update.rank, update.rank_image)
        .await?;

    Ok(Json(updated.into()))
}

/// Deactivate a user (soft delete)
///
/// Self-protection: an admin cannot deactivate their own account.
#[utoipa::path(
    delete,
    path = "/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Deactivation confirmed", body = MessageDto),
        (status = 403, description = "Admin required or self-delete rejected", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(acting_user): RequireAdmin,
    Path(user_id): Path<i32>,
) -> Result<Json<MessageDto>, Error> {
    let deactivated = AdminUserService::new(&state.auth_db, &state.app_db)
        .deactivate(acting_user.id, user_id)
        .await?;

    Ok(Json(MessageDto {
        message: format!("User {} deactivated successfully", deactivated.username),
    }))
}
