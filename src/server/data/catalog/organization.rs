use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::catalog::OrganizationDraft;

pub struct OrganizationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrganizationRepository<'a, C> {
    /// Creates a new instance of [`OrganizationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_sid(
        &self,
        sid: &str,
    ) -> Result<Option<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::Sid.eq(sid))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        sid: &str,
        draft: &OrganizationDraft,
    ) -> Result<entity::organization::Model, DbErr> {
        let organization = entity::organization::ActiveModel {
            sid: ActiveValue::Set(sid.to_string()),
            name: ActiveValue::Set(draft.name.clone()),
            archetype: ActiveValue::Set(draft.archetype.clone()),
            commitment: ActiveValue::Set(draft.commitment.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            member_count: ActiveValue::Set(draft.member_count),
            banner_url: ActiveValue::Set(draft.banner_url.clone()),
            logo_url: ActiveValue::Set(draft.logo_url.clone()),
            url: ActiveValue::Set(draft.url.clone()),
            api_data: ActiveValue::Set(draft.api_data.clone()),
            synced_at: ActiveValue::Set(Utc::now().naive_utc()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        organization.insert(self.db).await
    }

    pub async fn update(
        &self,
        organization: entity::organization::Model,
        draft: &OrganizationDraft,
    ) -> Result<entity::organization::Model, DbErr> {
        let mut organization: entity::organization::ActiveModel = organization.into();
        organization.name = ActiveValue::Set(draft.name.clone());
        organization.archetype = ActiveValue::Set(draft.archetype.clone());
        organization.commitment = ActiveValue::Set(draft.commitment.clone());
        organization.description = ActiveValue::Set(draft.description.clone());
        organization.member_count = ActiveValue::Set(draft.member_count);
        organization.banner_url = ActiveValue::Set(draft.banner_url.clone());
        organization.logo_url = ActiveValue::Set(draft.logo_url.clone());
        organization.url = ActiveValue::Set(draft.url.clone());
        organization.api_data = ActiveValue::Set(draft.api_data.clone());
        organization.synced_at = ActiveValue::Set(Utc::now().naive_utc());

        organization.update(self.db).await
    }

    /// Writes the member count derived from stored roster rows. The upstream
    /// count is never trusted once members have been synced.
    pub async fn set_member_count(
        &self,
        organization: entity::organization::Model,
        member_count: i32,
    ) -> Result<entity::organization::Model, DbErr> {
        let mut organization: entity::organization::ActiveModel = organization.into();
        organization.member_count = ActiveValue::Set(member_count);

        organization.update(self.db).await
    }
}
