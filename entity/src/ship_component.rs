//! Hardpoint component (weapon, shield, power plant, ...) attached to a ship.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ship_component")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ship_id: i32,
    pub kind: ComponentKind,
    pub name: String,
    pub size: String,
    pub quantity: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ComponentKind {
    #[sea_orm(string_value = "weapon")]
    Weapon,
    #[sea_orm(string_value = "shield")]
    Shield,
    #[sea_orm(string_value = "power_plant")]
    PowerPlant,
    #[sea_orm(string_value = "thruster")]
    Thruster,
    #[sea_orm(string_value = "quantum_drive")]
    QuantumDrive,
    #[sea_orm(string_value = "cooler")]
    Cooler,
    #[sea_orm(string_value = "sensor")]
    Sensor,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ship::Entity",
        from = "Column::ShipId",
        to = "super::ship::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Ship,
}

impl Related<super::ship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ship.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
