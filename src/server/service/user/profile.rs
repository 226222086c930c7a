use entity::auth_user::UserRole;
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::{auth::UserProfileDto, member::MemberUpdateDto},
    server::{
        data::member::MemberRepository,
        error::{auth::AuthError, Error},
    },
};

pub struct ProfileService<'a> {
    app_db: &'a DatabaseConnection,
}

impl<'a> ProfileService<'a> {
    /// Creates a new instance of [`ProfileService`]
    pub fn new(app_db: &'a DatabaseConnection) -> Self {
        Self { app_db }
    }

    /// Assembles the combined auth + member view of an account. The member
    /// side is looked up by the shared Discord id and may be absent for
    /// local-only accounts.
    pub async fn combined_profile(
        &self,
        user: &entity::auth_user::Model,
    ) -> Result<UserProfileDto, Error> {
        let member = match &user.discord_id {
            Some(discord_id) => {
                MemberRepository::new(self.app_db)
                    .get_by_discord_id(discord_id)
                    .await?
            }
            None => None,
        };

        Ok(UserProfileDto {
            username: user.username.clone(),
            discord_id: user.discord_id.clone(),
            email: user.email.clone(),
            role: user.role.to_value(),
            rank: member
                .as_ref()
                .map(|member| member.rank.clone())
                .unwrap_or_else(|| "member".to_string()),
            rank_image: user.rank_image.clone(),
            created_at: user.created_at,
            last_login: user.last_login,
            member: member.map(Into::into),
        })
    }

    /// Updates a member profile. Members may only edit their own profile;
    /// admins may edit any.
    pub async fn update_member(
        &self,
        acting_user: &entity::auth_user::Model,
        discord_id: &str,
        update: &MemberUpdateDto,
    ) -> Result<entity::member::Model, Error> {
        let is_self = acting_user.discord_id.as_deref() == Some(discord_id);
        if !is_self && acting_user.role != UserRole::Admin {
            return Err(AuthError::NotProfileOwner.into());
        }

        let member_repo = MemberRepository::new(self.app_db);
        let member = member_repo
            .get_by_discord_id(discord_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let updated = member_repo.update_profile(member, update).await?;

        Ok(updated)
    }
}
