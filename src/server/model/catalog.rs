//! Normalized field sets extracted from Star Citizen API payloads.
//!
//! A draft holds every mapped column for one entity, ready to be written by
//! a repository. The raw payload rides along in `api_data` untouched so
//! upstream fields the mapping does not know about are never lost.

use chrono::NaiveDate;
use entity::ship::{ProductionStatus, ShipSize};
use entity::ship_component::ComponentKind;

pub struct ManufacturerDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub logo_url: String,
    pub api_data: serde_json::Value,
}

pub struct ShipDraft {
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
    pub api_data: serde_json::Value,
}

pub struct ComponentDraft {
    pub kind: ComponentKind,
    pub name: String,
    pub size: String,
    pub quantity: i32,
}

pub struct OrganizationDraft {
    pub name: String,
    pub archetype: String,
    pub commitment: String,
    pub description: String,
    pub member_count: i32,
    pub banner_url: String,
    pub logo_url: String,
    pub url: String,
    pub api_data: serde_json::Value,
}

pub struct OrgMemberDraft {
    pub handle: String,
    pub display_name: String,
    pub rank: String,
    pub stars: i32,
    pub avatar_url: String,
    pub api_data: serde_json::Value,
}

/// Fields for a fleet ownership record.
pub struct FleetShipDraft {
    pub name: String,
    pub quantity: i32,
    pub status: entity::fleet_ship::OwnershipStatus,
    pub purchased_date: Option<NaiveDate>,
    pub notes: String,
}
