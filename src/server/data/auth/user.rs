use chrono::Utc;
use entity::auth_user::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::service::auth::discord::DiscordProfile;

/// Filters for the admin user listing.
pub struct UserListFilter {
    pub page: u64,
    pub limit: u64,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

pub struct AuthUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthUserRepository<'a> {
    /// Creates a new instance of [`AuthUserRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find()
            .filter(entity::auth_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn get_by_discord_id(
        &self,
        discord_id: &str,
    ) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find()
            .filter(entity::auth_user::Column::DiscordId.eq(discord_id))
            .one(self.db)
            .await
    }

    /// Creates a local account with a password credential. Used by the
    /// startup admin bootstrap.
    pub async fn create_local(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        must_change_password: bool,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let user = entity::auth_user::ActiveModel {
            discord_id: ActiveValue::Set(None),
            username: ActiveValue::Set(username.to_string()),
            discriminator: ActiveValue::Set(None),
            avatar: ActiveValue::Set(None),
            email: ActiveValue::Set(Some(email.to_string())),
            password_hash: ActiveValue::Set(Some(password_hash.to_string())),
            role: ActiveValue::Set(role),
            rank_image: ActiveValue::Set(None),
            must_change_password: ActiveValue::Set(must_change_password),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            last_login: ActiveValue::Set(None),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Creates an account from a first Discord login. The role defaults to
    /// the lowest-privilege value.
    pub async fn create_from_discord(
        &self,
        profile: &DiscordProfile,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let user = entity::auth_user::ActiveModel {
            discord_id: ActiveValue::Set(Some(profile.id.clone())),
            username: ActiveValue::Set(profile.username.clone()),
            discriminator: ActiveValue::Set(profile.discriminator.clone()),
            avatar: ActiveValue::Set(profile.avatar.clone()),
            email: ActiveValue::Set(profile.email.clone()),
            password_hash: ActiveValue::Set(None),
            role: ActiveValue::Set(UserRole::Member),
            rank_image: ActiveValue::Set(None),
            must_change_password: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            last_login: ActiveValue::Set(Some(Utc::now().naive_utc())),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Refreshes the display fields and last-login timestamp from a repeat
    /// Discord login.
    pub async fn update_from_discord(
        &self,
        user: entity::auth_user::Model,
        profile: &DiscordProfile,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.username = ActiveValue::Set(profile.username.clone());
        user.discriminator = ActiveValue::Set(profile.discriminator.clone());
        user.avatar = ActiveValue::Set(profile.avatar.clone());
        user.email = ActiveValue::Set(profile.email.clone());
        user.last_login = ActiveValue::Set(Some(Utc::now().naive_utc()));

        user.update(self.db).await
    }

    pub async fn touch_last_login(
        &self,
        user: entity::auth_user::Model,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.last_login = ActiveValue::Set(Some(Utc::now().naive_utc()));

        user.update(self.db).await
    }

    pub async fn update_role(
        &self,
        user: entity::auth_user::Model,
        role: UserRole,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.role = ActiveValue::Set(role);

        user.update(self.db).await
    }

    pub async fn set_rank_image(
        &self,
        user: entity::auth_user::Model,
        rank_image: Option<String>,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.rank_image = ActiveValue::Set(rank_image);

        user.update(self.db).await
    }

    /// Replaces the password credential and clears the must-change flag.
    pub async fn set_password(
        &self,
        user: entity::auth_user::Model,
        password_hash: &str,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.password_hash = ActiveValue::Set(Some(password_hash.to_string()));
        user.must_change_password = ActiveValue::Set(false);

        user.update(self.db).await
    }

    /// Soft delete. Accounts are never removed, only deactivated.
    pub async fn deactivate(
        &self,
        user: entity::auth_user::Model,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let mut user: entity::auth_user::ActiveModel = user.into();
        user.is_active = ActiveValue::Set(false);

        user.update(self.db).await
    }

    /// Paginated listing with optional role filter and substring search over
    /// username, email and Discord id.
    pub async fn list(
        &self,
        filter: &UserListFilter,
    ) -> Result<(Vec<entity::auth_user::Model>, u64), DbErr> {
        let mut query = entity::prelude::AuthUser::find();

        if let Some(role) = filter.role {
            query = query.filter(entity::auth_user::Column::Role.eq(role));
        }

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(entity::auth_user::Column::Username.contains(search.as_str()))
                    .add(entity::auth_user::Column::Email.contains(search.as_str()))
                    .add(entity::auth_user::Column::DiscordId.contains(search.as_str())),
            );
        }

        let total = query.clone().count(self.db).await?;

        let users = query
            .order_by_desc(entity::auth_user::Column::CreatedAt)
            .offset((filter.page.saturating_sub(1)) * filter.limit)
            .limit(filter.limit)
            .all(self.db)
            .await?;

        Ok((users, total))
    }
}
