use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::model::catalog::OrgMemberDraft;

pub struct OrgMemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrgMemberRepository<'a, C> {
    /// Creates a new instance of [`OrgMemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_handle(
        &self,
        organization_id: i32,
        handle: &str,
    ) -> Result<Option<entity::organization_member::Model>, DbErr> {
        entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .filter(entity::organization_member::Column::Handle.eq(handle))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        organization_id: i32,
        draft: &OrgMemberDraft,
    ) -> Result<entity::organization_member::Model, DbErr> {
        let member = entity::organization_member::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            handle: ActiveValue::Set(draft.handle.clone()),
            display_name: ActiveValue::Set(draft.display_name.clone()),
            rank: ActiveValue::Set(draft.rank.clone()),
            stars: ActiveValue::Set(draft.stars),
            avatar_url: ActiveValue::Set(draft.avatar_url.clone()),
            api_data: ActiveValue::Set(draft.api_data.clone()),
            synced_at: ActiveValue::Set(Utc::now().naive_utc()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        member.insert(self.db).await
    }

    pub async fn update(
        &self,
        member: entity::organization_member::Model,
        draft: &OrgMemberDraft,
    ) -> Result<entity::organization_member::Model, DbErr> {
        let mut member: entity::organization_member::ActiveModel = member.into();
        member.display_name = ActiveValue::Set(draft.display_name.clone());
        member.rank = ActiveValue::Set(draft.rank.clone());
        member.stars = ActiveValue::Set(draft.stars);
        member.avatar_url = ActiveValue::Set(draft.avatar_url.clone());
        member.api_data = ActiveValue::Set(draft.api_data.clone());
        member.synced_at = ActiveValue::Set(Utc::now().naive_utc());

        member.update(self.db).await
    }

    /// Counts stored roster rows for an organization. Source of the derived
    /// member count written back after a member sync.
    pub async fn count_by_organization(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .count(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use crate::server::{data::catalog::OrganizationRepository, util::test::factory};

    use super::*;

    /// Expect handle lookup and count to reflect created rows
    #[tokio::test]
    async fn handle_lookup_and_count() -> Result<(), TestError> {
        let test = test_setup_with_tables!(
            entity::prelude::Organization,
            entity::prelude::OrganizationMember
        )?;
        let organization = OrganizationRepository::new(&test.app_db)
            .create("FAROUT", &factory::organization_draft("Farout Corp"))
            .await?;

        let repo = OrgMemberRepository::new(&test.app_db);
        repo.create(organization.id, &factory::org_member_draft("kirk"))
            .await?;
        repo.create(organization.id, &factory::org_member_draft("spock"))
            .await?;

        assert!(repo.get_by_handle(organization.id, "kirk").await?.is_some());
        assert!(repo.get_by_handle(organization.id, "sulu").await?.is_none());
        assert_eq!(repo.count_by_organization(organization.id).await?, 2);

        Ok(())
    }
}
