use chrono::NaiveDateTime;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

use crate::model::member::MemberDto;

/// Discord authorize URL handed to the frontend to begin the login flow
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginUrlDto {
    pub url: String,
}

/// Credentials for a local (non-OAuth) login
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PasswordChangeDto {
    pub old_password: String,
    pub new_password: String,
}

/// Auth account as exposed to API consumers
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub discord_id: Option<String>,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub rank_image: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl From<entity::auth_user::Model> for UserDto {
    fn from(user: entity::auth_user::Model) -> Self {
        Self {
            id: user.id,
            discord_id: user.discord_id,
            username: user.username,
            discriminator: user.discriminator,
            avatar: user.avatar,
            email: user.email,
            role: user.role.to_value(),
            rank_image: user.rank_image,
            must_change_password: user.must_change_password,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// Paginated user listing for the admin surface
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleUpdateDto {
    pub role: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RankUpdateDto {
    pub rank: String,
    pub rank_image: Option<String>,
}

/// Combined auth + member profile returned by `GET /auth/user/me`
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfileDto {
    pub username: String,
    pub discord_id: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub rank: String,
    pub rank_image: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
    pub member: Option<MemberDto>,
}
