//! Ship catalog entry synced from the Star Citizen API.
//!
//! Natural key is (manufacturer_id, model); when the upstream payload carries
//! a numeric id it is stored in `external_id` and takes precedence during
//! reconciliation. Physical specs are kept as nullable doubles since the
//! upstream omits them for concept ships.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ship")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub manufacturer_id: i32,
    #[sea_orm(unique)]
    pub external_id: Option<i64>,
    pub model: String,
    pub name: String,
    pub kind: String,
    pub size: ShipSize,
    pub focus: String,
    pub description: String,
    pub length: Option<f64>,
    pub beam: Option<f64>,
    pub height: Option<f64>,
    pub mass: Option<f64>,
    pub crew_min: Option<i32>,
    pub crew_max: Option<i32>,
    pub cargo_capacity: Option<i32>,
    pub max_speed: Option<i32>,
    pub price: Option<f64>,
    pub image_url: String,
    pub store_url: String,
    pub production_status: ProductionStatus,
    pub api_data: Json,
    pub synced_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ShipSize {
    #[sea_orm(string_value = "vehicle")]
    Vehicle,
    #[sea_orm(string_value = "snub")]
    Snub,
    #[sea_orm(string_value = "small")]
    Small,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "large")]
    Large,
    #[sea_orm(string_value = "capital")]
    Capital,
    #[sea_orm(string_value = "")]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProductionStatus {
    #[sea_orm(string_value = "flight-ready")]
    FlightReady,
    #[sea_orm(string_value = "concept")]
    InConcept,
    #[sea_orm(string_value = "in-development")]
    InDevelopment,
    #[sea_orm(string_value = "")]
    Unknown,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Manufacturer,
    #[sea_orm(has_many = "super::ship_component::Entity")]
    ShipComponent,
    #[sea_orm(has_many = "super::fleet_ship::Entity")]
    FleetShip,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::ship_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipComponent.def()
    }
}

impl Related<super::fleet_ship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetShip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
