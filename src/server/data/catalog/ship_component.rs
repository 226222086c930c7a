use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::catalog::ComponentDraft;

pub struct ShipComponentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShipComponentRepository<'a, C> {
    /// Creates a new instance of [`ShipComponentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_ship_id(
        &self,
        ship_id: i32,
    ) -> Result<Vec<entity::ship_component::Model>, DbErr> {
        entity::prelude::ShipComponent::find()
            .filter(entity::ship_component::Column::ShipId.eq(ship_id))
            .order_by_asc(entity::ship_component::Column::Kind)
            .all(self.db)
            .await
    }

    /// Replaces a ship's component rows wholesale. Components carry no
    /// upstream natural key, so a forced sync rewrites the set instead of
    /// reconciling row by row.
    pub async fn replace_for_ship(
        &self,
        ship_id: i32,
        components: &[ComponentDraft],
    ) -> Result<(), DbErr> {
        entity::prelude::ShipComponent::delete_many()
            .filter(entity::ship_component::Column::ShipId.eq(ship_id))
            .exec(self.db)
            .await?;

        if components.is_empty() {
            return Ok(());
        }

        let rows = components
            .iter()
            .map(|component| entity::ship_component::ActiveModel {
                ship_id: ActiveValue::Set(ship_id),
                kind: ActiveValue::Set(component.kind),
                name: ActiveValue::Set(component.name.clone()),
                size: ActiveValue::Set(component.size.clone()),
                quantity: ActiveValue::Set(component.quantity),
                ..Default::default()
            });

        entity::prelude::ShipComponent::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
