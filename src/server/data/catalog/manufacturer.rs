use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::catalog::ManufacturerDraft;

pub struct ManufacturerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ManufacturerRepository<'a, C> {
    /// Creates a new instance of [`ManufacturerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_code(
        &self,
        code: &str,
    ) -> Result<Option<entity::manufacturer::Model>, DbErr> {
        entity::prelude::Manufacturer::find()
            .filter(entity::manufacturer::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        draft: &ManufacturerDraft,
    ) -> Result<entity::manufacturer::Model, DbErr> {
        let manufacturer = entity::manufacturer::ActiveModel {
            code: ActiveValue::Set(draft.code.clone()),
            name: ActiveValue::Set(draft.name.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            logo_url: ActiveValue::Set(draft.logo_url.clone()),
            api_data: ActiveValue::Set(draft.api_data.clone()),
            synced_at: ActiveValue::Set(Utc::now().naive_utc()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        manufacturer.insert(self.db).await
    }

    /// Resolves a manufacturer by its code, creating it when absent.
    /// Existing rows are left untouched; ships carry richer manufacturer
    /// payloads than the stub embedded in other ships.
    pub async fn get_or_create(
        &self,
        draft: &ManufacturerDraft,
    ) -> Result<entity::manufacturer::Model, DbErr> {
        if let Some(existing) = self.get_by_code(&draft.code).await? {
            return Ok(existing);
        }

        self.create(draft).await
    }
}
