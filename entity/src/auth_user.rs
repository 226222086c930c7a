//! Login-capable account stored in the auth database.
//!
//! Accounts are created either by the startup admin bootstrap (local
//! username/password) or by the first successful Discord login (discord_id
//! populated). Rows are never hard-deleted, only deactivated.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub discord_id: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub rank_image: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
    pub created_at: DateTime,
    pub last_login: Option<DateTime>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
