use chrono::Utc;
use entity::fleet_ship::OwnershipStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::catalog::FleetShipDraft;

pub struct FleetShipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FleetShipRepository<'a> {
    /// Creates a new instance of [`FleetShipRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        member_id: i32,
        ship_id: i32,
        draft: &FleetShipDraft,
    ) -> Result<entity::fleet_ship::Model, DbErr> {
        let fleet_ship = entity::fleet_ship::ActiveModel {
            ship_id: ActiveValue::Set(ship_id),
            member_id: ActiveValue::Set(member_id),
            name: ActiveValue::Set(draft.name.clone()),
            quantity: ActiveValue::Set(draft.quantity),
            status: ActiveValue::Set(draft.status),
            purchased_date: ActiveValue::Set(draft.purchased_date),
            notes: ActiveValue::Set(draft.notes.clone()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        fleet_ship.insert(self.db).await
    }

    pub async fn get_by_member(
        &self,
        member_id: i32,
    ) -> Result<Vec<entity::fleet_ship::Model>, DbErr> {
        entity::prelude::FleetShip::find()
            .filter(entity::fleet_ship::Column::MemberId.eq(member_id))
            .order_by_asc(entity::fleet_ship::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        fleet_ship: entity::fleet_ship::Model,
        status: OwnershipStatus,
    ) -> Result<entity::fleet_ship::Model, DbErr> {
        let mut fleet_ship: entity::fleet_ship::ActiveModel = fleet_ship.into();
        fleet_ship.status = ActiveValue::Set(status);
        fleet_ship.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        fleet_ship.update(self.db).await
    }

    pub async fn delete(&self, fleet_ship_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::FleetShip::delete_by_id(fleet_ship_id)
            .exec(self.db)
            .await
    }
}
