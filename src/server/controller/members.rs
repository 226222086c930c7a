use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        member::{MemberDto, MemberUpdateDto},
    },
    server::{
        data::member::MemberRepository,
        error::{auth::AuthError, Error},
        model::{app::AppState, auth::CurrentUser},
        service::user::ProfileService,
    },
};

pub static MEMBERS_TAG: &str = "members";

/// List member profiles
#[utoipa::path(
    get,
    path = "/members",
    tag = MEMBERS_TAG,
    responses(
        (status = 200, description = "All member profiles", body = Vec<MemberDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<MemberDto>>, Error> {
    let members = MemberRepository::new(&state.app_db).list().await?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Fetch one member profile by Discord id
#[utoipa::path(
    get,
    path = "/members/{discord_id}",
    tag = MEMBERS_TAG,
    params(("discord_id" = String, Path, description = "Discord id of the member")),
    responses(
        (status = 200, description = "The member profile", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn get_member(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(discord_id): Path<String>,
) -> Result<Json<MemberDto>, Error> {
    let member = MemberRepository::new(&state.app_db)
        .get_by_discord_id(&discord_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(member.into()))
}

/// Update a member profile (self or admin)
#[utoipa::path(
    put,
    path = "/members/{discord_id}",
    tag = MEMBERS_TAG,
    params(("discord_id" = String, Path, description = "Discord id of the member")),
    request_body = MemberUpdateDto,
    responses(
        (status = 200, description = "Updated profile", body = MemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the profile owner", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn update_member(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(discord_id): Path<String>,
    Json(update): Json<MemberUpdateDto>,
) -> Result<Json<MemberDto>, Error> {
    let updated = ProfileService::new(&state.app_db)
        .update_member(&user, &discord_id, &update)
        .await?;

    Ok(Json(updated.into()))
}
