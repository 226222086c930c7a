//! Ship ownership record linking a member to a catalog ship.
//!
//! The ship side is restrict-on-delete so a catalog ship cannot disappear
//! from under fleet records; the owner side cascades.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fleet_ship")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ship_id: i32,
    pub member_id: i32,
    pub name: String,
    pub quantity: i32,
    pub status: OwnershipStatus,
    pub purchased_date: Option<Date>,
    pub notes: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OwnershipStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "pledged")]
    Pledged,
    #[sea_orm(string_value = "loaned")]
    Loaned,
    #[sea_orm(string_value = "sold")]
    Sold,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ship::Entity",
        from = "Column::ShipId",
        to = "super::ship::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Ship,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Member,
}

impl Related<super::ship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ship.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
