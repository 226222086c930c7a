use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter,
};

use crate::server::model::catalog::ShipDraft;

pub struct ShipRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShipRepository<'a, C> {
    /// Creates a new instance of [`ShipRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<entity::ship::Model>, DbErr> {
        entity::prelude::Ship::find()
            .filter(entity::ship::Column::ExternalId.eq(external_id))
            .one(self.db)
            .await
    }

    /// Looks a ship up by its composite natural key.
    pub async fn get_by_natural_key(
        &self,
        manufacturer_id: i32,
        model: &str,
    ) -> Result<Option<entity::ship::Model>, DbErr> {
        entity::prelude::Ship::find()
            .filter(entity::ship::Column::ManufacturerId.eq(manufacturer_id))
            .filter(entity::ship::Column::Model.eq(model))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        manufacturer_id: i32,
        draft: &ShipDraft,
    ) -> Result<entity::ship::Model, DbErr> {
        let ship = entity::ship::ActiveModel {
            manufacturer_id: ActiveValue::Set(manufacturer_id),
            external_id: ActiveValue::Set(draft.external_id),
            model: ActiveValue::Set(draft.model.clone()),
            name: ActiveValue::Set(draft.name.clone()),
            kind: ActiveValue::Set(draft.kind.clone()),
            size: ActiveValue::Set(draft.size),
            focus: ActiveValue::Set(draft.focus.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            length: ActiveValue::Set(draft.length),
            beam: ActiveValue::Set(draft.beam),
            height: ActiveValue::Set(draft.height),
            mass: ActiveValue::Set(draft.mass),
            crew_min: ActiveValue::Set(draft.crew_min),
            crew_max: ActiveValue::Set(draft.crew_max),
            cargo_capacity: ActiveValue::Set(draft.cargo_capacity),
            max_speed: ActiveValue::Set(draft.max_speed),
            price: ActiveValue::Set(draft.price),
            image_url: ActiveValue::Set(draft.image_url.clone()),
            store_url: ActiveValue::Set(draft.store_url.clone()),
            production_status: ActiveValue::Set(draft.production_status),
            api_data: ActiveValue::Set(draft.api_data.clone()),
            synced_at: ActiveValue::Set(Utc::now().naive_utc()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        ship.insert(self.db).await
    }

    /// Overwrites every mapped field and refreshes the sync timestamp.
    /// Used by forced sync runs.
    pub async fn update(
        &self,
        ship: entity::ship::Model,
        manufacturer_id: i32,
        draft: &ShipDraft,
    ) -> Result<entity::ship::Model, DbErr> {
        let mut ship: entity::ship::ActiveModel = ship.into();
        ship.manufacturer_id = ActiveValue::Set(manufacturer_id);
        ship.external_id = ActiveValue::Set(draft.external_id);
        ship.model = ActiveValue::Set(draft.model.clone());
        ship.name = ActiveValue::Set(draft.name.clone());
        ship.kind = ActiveValue::Set(draft.kind.clone());
        ship.size = ActiveValue::Set(draft.size);
        ship.focus = ActiveValue::Set(draft.focus.clone());
        ship.description = ActiveValue::Set(draft.description.clone());
        ship.length = ActiveValue::Set(draft.length);
        ship.beam = ActiveValue::Set(draft.beam);
        ship.height = ActiveValue::Set(draft.height);
        ship.mass = ActiveValue::Set(draft.mass);
        ship.crew_min = ActiveValue::Set(draft.crew_min);
        ship.crew_max = ActiveValue::Set(draft.crew_max);
        ship.cargo_capacity = ActiveValue::Set(draft.cargo_capacity);
        ship.max_speed = ActiveValue::Set(draft.max_speed);
        ship.price = ActiveValue::Set(draft.price);
        ship.image_url = ActiveValue::Set(draft.image_url.clone());
        ship.store_url = ActiveValue::Set(draft.store_url.clone());
        ship.production_status = ActiveValue::Set(draft.production_status);
        ship.api_data = ActiveValue::Set(draft.api_data.clone());
        ship.synced_at = ActiveValue::Set(Utc::now().naive_utc());

        ship.update(self.db).await
    }

    /// Deletes a catalog ship. Fails with a database error while fleet
    /// ownership rows still reference it (restrict foreign key).
    pub async fn delete(&self, ship_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Ship::delete_by_id(ship_id)
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::Ship::find().count(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use stanton_test_utils::prelude::*;

    use crate::server::{data::catalog::ManufacturerRepository, util::test::factory};

    use super::*;

    /// Expect natural-key lookup to find a created ship
    #[tokio::test]
    async fn natural_key_lookup_finds_created_ship() -> Result<(), TestError> {
        let test =
            test_setup_with_tables!(entity::prelude::Manufacturer, entity::prelude::Ship)?;
        let manufacturer = ManufacturerRepository::new(&test.app_db)
            .create(&factory::manufacturer_draft("AEGS", "Aegis Dynamics"))
            .await?;

        let repo = ShipRepository::new(&test.app_db);
        let created = repo
            .create(manufacturer.id, &factory::ship_draft("Sabre", None))
            .await?;

        let found = repo.get_by_natural_key(manufacturer.id, "Sabre").await?;
        assert_eq!(found.map(|ship| ship.id), Some(created.id));

        Ok(())
    }

    /// Expect external-id lookup to resolve independently of the model name
    #[tokio::test]
    async fn external_id_lookup_resolves() -> Result<(), TestError> {
        let test =
            test_setup_with_tables!(entity::prelude::Manufacturer, entity::prelude::Ship)?;
        let manufacturer = ManufacturerRepository::new(&test.app_db)
            .create(&factory::manufacturer_draft("AEGS", "Aegis Dynamics"))
            .await?;

        let repo = ShipRepository::new(&test.app_db);
        let created = repo
            .create(manufacturer.id, &factory::ship_draft("Sabre", Some(77)))
            .await?;

        let found = repo.get_by_external_id(77).await?;
        assert_eq!(found.map(|ship| ship.id), Some(created.id));

        Ok(())
    }

    /// Expect update to keep the row id while overwriting mapped fields
    #[tokio::test]
    async fn update_overwrites_in_place() -> Result<(), TestError> {
        let test =
            test_setup_with_tables!(entity::prelude::Manufacturer, entity::prelude::Ship)?;
        let manufacturer = ManufacturerRepository::new(&test.app_db)
            .create(&factory::manufacturer_draft("AEGS", "Aegis Dynamics"))
            .await?;

        let repo = ShipRepository::new(&test.app_db);
        let created = repo
            .create(manufacturer.id, &factory::ship_draft("Sabre", None))
            .await?;

        let mut draft = factory::ship_draft("Sabre", None);
        draft.cargo_capacity = Some(96);
        let updated = repo.update(created.clone(), manufacturer.id, &draft).await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.cargo_capacity, Some(96));
        assert_eq!(repo.count().await?, 1);

        Ok(())
    }
}
