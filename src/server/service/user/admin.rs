//! Administrative user management.
//!
//! Role changes, rank updates and soft deletion, all admin-gated at the
//! controller layer. A self-protection rule rejects an admin acting on
//! their own role or active flag so an organization cannot lock itself out
//! of its last admin by accident.

use entity::auth_user::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        auth::{user::UserListFilter, AuthUserRepository},
        member::MemberRepository,
    },
    error::{auth::AuthError, Error},
};

pub struct AdminUserService<'a> {
    auth_db: &'a DatabaseConnection,
    app_db: &'a DatabaseConnection,
}

impl<'a> AdminUserService<'a> {
    /// Creates a new instance of [`AdminUserService`]
    pub fn new(auth_db: &'a DatabaseConnection, app_db: &'a DatabaseConnection) -> Self {
        Self { auth_db, app_db }
    }

    pub async fn list_users(
        &self,
        filter: &UserListFilter,
    ) -> Result<(Vec<entity::auth_user::Model>, u64), Error> {
        let users = AuthUserRepository::new(self.auth_db).list(filter).await?;

        Ok(users)
    }

    /// Changes a user's role. Rejected when the acting admin targets their
    /// own account or the target is inactive.
    pub async fn update_role(
        &self,
        acting_user_id: i32,
        target_user_id: i32,
        role: UserRole,
    ) -> Result<entity::auth_user::Model, Error> {
        if acting_user_id == target_user_id {
            return Err(AuthError::SelfRoleChange.into());
        }

        let user_repo = AuthUserRepository::new(self.auth_db);
        let target = user_repo
            .get_by_id(target_user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !target.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        let updated = user_repo.update_role(target, role).await?;

        Ok(updated)
    }

    /// Updates the rank label and image. The image lives on the auth
    /// account, the label on the member profile, so this is a dual-store
    /// write; auth-only accounts simply have no profile to update.
    pub async fn update_rank(
        &self,
        target_user_id: i32,
        rank: &str,
        rank_image: Option<String>,
    ) -> Result<entity::auth_user::Model, Error> {
        let user_repo = AuthUserRepository::new(self.auth_db);
        let target = user_repo
            .get_by_id(target_user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !target.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        let updated = user_repo.set_rank_image(target, rank_image).await?;

        if let Some(discord_id) = &updated.discord_id {
            let member_repo = MemberRepository::new(self.app_db);
            if let Some(member) = member_repo.get_by_discord_id(discord_id).await? {
                member_repo.set_rank(member, rank).await?;
            }
        }

        Ok(updated)
    }

    /// Soft-deletes a user. Rejected when the acting admin targets their
    /// own account.
    pub async fn deactivate(
        &self,
        acting_user_id: i32,
        target_user_id: i32,
    ) -> Result<entity::auth_user::Model, Error> {
        if acting_user_id == target_user_id {
            return Err(AuthError::SelfDeactivation.into());
        }

        let user_repo = AuthUserRepository::new(self.auth_db);
        let target = user_repo
            .get_by_id(target_user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let deactivated = user_repo.deactivate(target).await?;

        Ok(deactivated)
    }
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use crate::server::service::auth::discord::DiscordProfile;

    use super::*;

    async fn seed_admin_and_member(
        test: &TestSetup,
    ) -> Result<(entity::auth_user::Model, entity::auth_user::Model), TestError> {
        let repo = AuthUserRepository::new(&test.auth_db);
        let admin = repo
            .create_local("admin", "admin@example.com", "hash", UserRole::Admin, false)
            .await?;
        let member = repo
            .create_from_discord(&DiscordProfile {
                id: "42".to_string(),
                username: "kirk".to_string(),
                discriminator: None,
                avatar: None,
                email: None,
            })
            .await?;

        Ok((admin, member))
    }

    /// Expect changing another user's role to succeed
    #[tokio::test]
    async fn role_change_on_other_user_succeeds() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
        let (admin, member) = seed_admin_and_member(&test).await?;

        let service = AdminUserService::new(&test.auth_db, &test.app_db);
        let updated = service
            .update_role(admin.id, member.id, UserRole::Admin)
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::Admin);

        Ok(())
    }

    /// Expect an admin's attempt to change their own role to be rejected
    #[tokio::test]
    async fn self_role_change_is_rejected() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
        let (admin, _) = seed_admin_and_member(&test).await?;

        let service = AdminUserService::new(&test.auth_db, &test.app_db);
        let result = service
            .update_role(admin.id, admin.id, UserRole::Member)
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::SelfRoleChange))
        ));

        Ok(())
    }

    /// Expect an admin's attempt to deactivate themselves to be rejected
    /// while deactivating someone else succeeds
    #[tokio::test]
    async fn self_deactivation_is_rejected() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
        let (admin, member) = seed_admin_and_member(&test).await?;

        let service = AdminUserService::new(&test.auth_db, &test.app_db);

        let result = service.deactivate(admin.id, admin.id).await;
        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::SelfDeactivation))
        ));

        let deactivated = service.deactivate(admin.id, member.id).await.unwrap();
        assert!(!deactivated.is_active);

        Ok(())
    }

    /// Expect inactive targets to be rejected for role changes
    #[tokio::test]
    async fn inactive_target_is_rejected() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
        let (admin, member) = seed_admin_and_member(&test).await?;
        AuthUserRepository::new(&test.auth_db)
            .deactivate(member.clone())
            .await?;

        let service = AdminUserService::new(&test.auth_db, &test.app_db);
        let result = service.update_role(admin.id, member.id, UserRole::Admin).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InactiveUser))
        ));

        Ok(())
    }

    /// Expect rank updates to write both the auth store and the member
    /// profile when one exists
    #[tokio::test]
    async fn rank_update_writes_both_stores() -> Result<(), TestError> {
        let test = test_setup_with_auth_tables!(entity::prelude::Member)?;
        let (_, member_user) = seed_admin_and_member(&test).await?;
        MemberRepository::new(&test.app_db)
            .create_from_discord("42", "kirk", None)
            .await?;

        let service = AdminUserService::new(&test.auth_db, &test.app_db);
        let updated = service
            .update_rank(
                member_user.id,
                "officer",
                Some("https://cdn.example/officer.png".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(
            updated.rank_image,
            Some("https://cdn.example/officer.png".to_string())
        );

        let member = MemberRepository::new(&test.app_db)
            .get_by_discord_id("42")
            .await?
            .unwrap();
        assert_eq!(member.rank, "officer");

        Ok(())
    }
}
