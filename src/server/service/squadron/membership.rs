//! Squadron membership transitions.
//!
//! Joining is gated on the squadron being active, recruiting and under its
//! capacity ceiling. Leaving is always a soft transition; the row survives
//! with is_active=false so rejoining reactivates it instead of growing the
//! table.

use entity::squadron_member::SquadronRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::squadron::{SquadronMemberRepository, SquadronRepository},
    error::{squadron::SquadronError, Error},
};

pub struct SquadronService<'a> {
    app_db: &'a DatabaseConnection,
}

impl<'a> SquadronService<'a> {
    /// Creates a new instance of [`SquadronService`]
    pub fn new(app_db: &'a DatabaseConnection) -> Self {
        Self { app_db }
    }

    /// Adds a member to a squadron, reactivating a previous membership row
    /// when one exists.
    pub async fn join(
        &self,
        squadron_id: i32,
        member_id: i32,
        role: SquadronRole,
    ) -> Result<entity::squadron_member::Model, Error> {
        let squadron = SquadronRepository::new(self.app_db)
            .get_by_id(squadron_id)
            .await?
            .ok_or(SquadronError::NotFound)?;

        if !squadron.is_active || !squadron.is_recruiting {
            return Err(SquadronError::NotRecruiting.into());
        }

        let membership_repo = SquadronMemberRepository::new(self.app_db);

        if let Some(max_members) = squadron.max_members {
            let active = membership_repo.count_active(squadron.id).await?;
            if active >= u64::try_from(max_members.max(0)).unwrap_or(0) {
                return Err(SquadronError::Full.into());
            }
        }

        let membership = match membership_repo.get(squadron.id, member_id).await? {
            Some(existing) if existing.is_active => {
                return Err(SquadronError::AlreadyMember.into());
            }
            Some(previous) => membership_repo.reactivate(previous, role).await?,
            None => membership_repo.insert(squadron.id, member_id, role).await?,
        };

        Ok(membership)
    }

    /// Marks a member as having left; the membership row is retained.
    pub async fn leave(
        &self,
        squadron_id: i32,
        member_id: i32,
    ) -> Result<entity::squadron_member::Model, Error> {
        let membership_repo = SquadronMemberRepository::new(self.app_db);

        let membership = membership_repo
            .get(squadron_id, member_id)
            .await?
            .filter(|membership| membership.is_active)
            .ok_or(SquadronError::NotAMember)?;

        let left = membership_repo.leave(membership).await?;

        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};
    use stanton_test_utils::prelude::*;

    use crate::server::data::{member::MemberRepository, squadron::squadron::SquadronDraft};

    use super::*;

    async fn seed_squadron(
        test: &TestSetup,
        max_members: Option<i32>,
    ) -> Result<entity::squadron::Model, TestError> {
        let squadron = SquadronRepository::new(&test.app_db)
            .create(&SquadronDraft {
                name: "Alpha Wing".to_string(),
                callsign: "ALPHA".to_string(),
                description: String::new(),
                motto: String::new(),
                focus: "combat".to_string(),
                is_recruiting: true,
                max_members,
                color_code: "#55E6A5".to_string(),
            })
            .await?;

        Ok(squadron)
    }

    async fn seed_member(
        test: &TestSetup,
        discord_id: &str,
    ) -> Result<entity::member::Model, TestError> {
        let member = MemberRepository::new(&test.app_db)
            .create_from_discord(discord_id, discord_id, None)
            .await?;

        Ok(member)
    }

    /// Expect leaving to be a soft transition and rejoining to reuse the row
    #[tokio::test]
    async fn leave_is_soft_and_rejoin_reactivates() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Member,
            entity::prelude::Squadron,
            entity::prelude::SquadronMember
        )?;
        let squadron = seed_squadron(&test, None).await?;
        let member = seed_member(&test, "42").await?;

        let service = SquadronService::new(&test.app_db);

        let joined = service
            .join(squadron.id, member.id, SquadronRole::Member)
            .await
            .unwrap();
        assert!(joined.is_active);

        let left = service.leave(squadron.id, member.id).await.unwrap();
        assert!(!left.is_active);
        assert!(left.left_at.is_some());

        let rejoined = service
            .join(squadron.id, member.id, SquadronRole::Specialist)
            .await
            .unwrap();
        assert_eq!(rejoined.id, joined.id);
        assert!(rejoined.is_active);
        assert!(rejoined.left_at.is_none());
        assert_eq!(rejoined.role, SquadronRole::Specialist);

        let rows = entity::prelude::SquadronMember::find()
            .count(&test.app_db)
            .await?;
        assert_eq!(rows, 1);

        Ok(())
    }

    /// Expect a full squadron to reject new joiners until someone leaves
    #[tokio::test]
    async fn capacity_ceiling_is_enforced() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Member,
            entity::prelude::Squadron,
            entity::prelude::SquadronMember
        )?;
        let squadron = seed_squadron(&test, Some(1)).await?;
        let first = seed_member(&test, "1").await?;
        let second = seed_member(&test, "2").await?;

        let service = SquadronService::new(&test.app_db);
        service
            .join(squadron.id, first.id, SquadronRole::Member)
            .await
            .unwrap();

        let rejected = service.join(squadron.id, second.id, SquadronRole::Member).await;
        assert!(matches!(
            rejected,
            Err(Error::SquadronError(SquadronError::Full))
        ));

        // A soft leave frees the slot.
        service.leave(squadron.id, first.id).await.unwrap();
        let accepted = service.join(squadron.id, second.id, SquadronRole::Member).await;
        assert!(accepted.is_ok());

        Ok(())
    }

    /// Expect joining twice while active to be rejected
    #[tokio::test]
    async fn double_join_is_rejected() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Member,
            entity::prelude::Squadron,
            entity::prelude::SquadronMember
        )?;
        let squadron = seed_squadron(&test, None).await?;
        let member = seed_member(&test, "42").await?;

        let service = SquadronService::new(&test.app_db);
        service
            .join(squadron.id, member.id, SquadronRole::Member)
            .await
            .unwrap();

        let again = service.join(squadron.id, member.id, SquadronRole::Member).await;

        assert!(matches!(
            again,
            Err(Error::SquadronError(SquadronError::AlreadyMember))
        ));

        Ok(())
    }
}
