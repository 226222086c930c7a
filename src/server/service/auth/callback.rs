//! OAuth callback handling: token exchange, profile fetch and the
//! dual-store identity upsert.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{auth::AuthUserRepository, member::MemberRepository},
    error::Error,
    service::auth::discord::{DiscordClient, DiscordProfile},
};

pub struct CallbackService<'a> {
    auth_db: &'a DatabaseConnection,
    app_db: &'a DatabaseConnection,
    discord: &'a DiscordClient,
}

impl<'a> CallbackService<'a> {
    /// Creates a new instance of [`CallbackService`]
    pub fn new(
        auth_db: &'a DatabaseConnection,
        app_db: &'a DatabaseConnection,
        discord: &'a DiscordClient,
    ) -> Self {
        Self {
            auth_db,
            app_db,
            discord,
        }
    }

    /// Completes a Discord login after CSRF validation has passed.
    ///
    /// Exchanges the code, fetches the profile, then upserts the auth
    /// account and the member profile keyed by the same Discord id. No
    /// local row is written until the profile is confirmed, so a failed
    /// exchange or fetch never leaves a dangling account. The two stores
    /// are physically separate; if the profile write fails after the auth
    /// write the error propagates and the next successful login repairs
    /// the pair.
    pub async fn handle_callback(&self, code: &str) -> Result<entity::auth_user::Model, Error> {
        let access_token = self.discord.exchange_code(code).await?;
        let profile = self.discord.fetch_profile(&access_token).await?;

        let user = self.upsert_auth_user(&profile).await?;
        self.upsert_member_profile(&profile).await?;

        tracing::info!(
            discord_id = %profile.id,
            username = %user.username,
            "discord login reconciled"
        );

        Ok(user)
    }

    /// Upserts the login account in the auth store by Discord id.
    pub async fn upsert_auth_user(
        &self,
        profile: &DiscordProfile,
    ) -> Result<entity::auth_user::Model, Error> {
        let user_repo = AuthUserRepository::new(self.auth_db);

        let user = match user_repo.get_by_discord_id(&profile.id).await? {
            Some(existing) => user_repo.update_from_discord(existing, profile).await?,
            None => user_repo.create_from_discord(profile).await?,
        };

        Ok(user)
    }

    /// Upserts the member profile in the app store by the same Discord id.
    pub async fn upsert_member_profile(
        &self,
        profile: &DiscordProfile,
    ) -> Result<entity::member::Model, Error> {
        let member_repo = MemberRepository::new(self.app_db);
        let avatar_url = profile.avatar_url();

        let member = match member_repo.get_by_discord_id(&profile.id).await? {
            Some(existing) => {
                member_repo
                    .update_from_discord(existing, &profile.username, avatar_url)
                    .await?
            }
            None => {
                member_repo
                    .create_from_discord(&profile.id, &profile.username, avatar_url)
                    .await?
            }
        };

        Ok(member)
    }
}
