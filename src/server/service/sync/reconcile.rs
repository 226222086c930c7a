//! Pure reconciliation rules: merge decisions, field normalization and
//! payload-to-draft mapping.
//!
//! Nothing in this module touches the database or the network, which keeps
//! the merge policy trivially unit-testable.

use entity::ship::{ProductionStatus, ShipSize};
use entity::ship_component::ComponentKind;

use crate::server::{
    error::catalog::CatalogError,
    model::catalog::{
        ComponentDraft, ManufacturerDraft, OrgMemberDraft, OrganizationDraft, ShipDraft,
    },
};

/// Merge decision for one item against local storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Create,
    Update,
    Skip,
}

/// The upsert conflict policy: absent rows are created, present rows are
/// only overwritten when the run is forced.
pub fn decide(exists: bool, force: bool) -> Outcome {
    match (exists, force) {
        (false, _) => Outcome::Create,
        (true, true) => Outcome::Update,
        (true, false) => Outcome::Skip,
    }
}

/// Maps an upstream size label onto the local enumeration. Unrecognized
/// values land in the unknown bucket instead of raising.
pub fn normalize_size(raw: &str) -> ShipSize {
    match raw.trim().to_lowercase().as_str() {
        "vehicle" => ShipSize::Vehicle,
        "snub" | "snub fighter" => ShipSize::Snub,
        "small" => ShipSize::Small,
        "medium" => ShipSize::Medium,
        "large" => ShipSize::Large,
        "capital" => ShipSize::Capital,
        _ => ShipSize::Unknown,
    }
}

pub fn normalize_production_status(raw: &str) -> ProductionStatus {
    match raw.trim().to_lowercase().as_str() {
        "flight-ready" | "flight ready" => ProductionStatus::FlightReady,
        "concept" | "in concept" => ProductionStatus::InConcept,
        "in-development" | "in development" | "in-production" => ProductionStatus::InDevelopment,
        _ => ProductionStatus::Unknown,
    }
}

pub fn normalize_component_kind(raw: &str) -> ComponentKind {
    match raw.trim().to_lowercase().as_str() {
        "weapon" => ComponentKind::Weapon,
        "shield" | "shield_generator" => ComponentKind::Shield,
        "power_plant" | "powerplant" => ComponentKind::PowerPlant,
        "thruster" => ComponentKind::Thruster,
        "quantum_drive" | "qdrive" => ComponentKind::QuantumDrive,
        "cooler" => ComponentKind::Cooler,
        "sensor" | "radar" => ComponentKind::Sensor,
        _ => ComponentKind::Other,
    }
}

/// Extracts the manufacturer stub, ship fields and component list from one
/// upstream ship payload. A ship without a usable model or name is rejected
/// per-item.
pub fn map_ship(
    payload: &serde_json::Value,
) -> Result<(ManufacturerDraft, ShipDraft, Vec<ComponentDraft>), CatalogError> {
    let name = str_field(payload, "name");
    if name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }

    // The model designation falls back to the display name upstream.
    let model = match str_field(payload, "model") {
        model if model.trim().is_empty() => name.clone(),
        model => model,
    };

    let manufacturer_data = payload
        .get("manufacturer")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    let manufacturer = ManufacturerDraft {
        code: match str_field(&manufacturer_data, "code") {
            code if code.trim().is_empty() => "UNK".to_string(),
            code => code,
        },
        name: match str_field(&manufacturer_data, "name") {
            name if name.trim().is_empty() => "Unknown".to_string(),
            name => name,
        },
        description: str_field(&manufacturer_data, "description"),
        logo_url: str_field(&manufacturer_data, "logo"),
        api_data: manufacturer_data.clone(),
    };

    let crew = payload.get("crew");
    let media = payload.get("media");

    let ship = ShipDraft {
        external_id: i64_field(payload, "id"),
        model,
        name,
        kind: str_field(payload, "type"),
        size: normalize_size(&str_field(payload, "size")),
        focus: str_field(payload, "focus"),
        description: str_field(payload, "description"),
        length: f64_field(payload, "length"),
        beam: f64_field(payload, "beam"),
        height: f64_field(payload, "height"),
        mass: f64_field(payload, "mass"),
        crew_min: crew.and_then(|crew| i32_field(crew, "min")),
        crew_max: crew.and_then(|crew| i32_field(crew, "max")),
        cargo_capacity: i32_field(payload, "cargo"),
        max_speed: i32_field(payload, "max_speed"),
        price: f64_field(payload, "price"),
        image_url: media.map(|media| str_field(media, "image")).unwrap_or_default(),
        store_url: str_field(payload, "store_url"),
        production_status: normalize_production_status(&str_field(payload, "production_status")),
        api_data: payload.clone(),
    };

    let components = payload
        .get("components")
        .and_then(serde_json::Value::as_array)
        .map(|components| components.iter().map(map_component).collect())
        .unwrap_or_default();

    Ok((manufacturer, ship, components))
}

fn map_component(payload: &serde_json::Value) -> ComponentDraft {
    ComponentDraft {
        kind: normalize_component_kind(&str_field(payload, "type")),
        name: str_field(payload, "name"),
        size: str_field(payload, "size"),
        quantity: i32_field(payload, "quantity").unwrap_or(1).max(1),
    }
}

/// Maps an organization payload. The SID comes from the caller, not the
/// payload, so the row always matches the requested organization.
pub fn map_organization(sid: &str, payload: &serde_json::Value) -> OrganizationDraft {
    OrganizationDraft {
        name: match str_field(payload, "name") {
            name if name.trim().is_empty() => sid.to_string(),
            name => name,
        },
        archetype: str_field(payload, "archetype"),
        commitment: str_field(payload, "commitment"),
        description: str_field(payload, "description"),
        member_count: i32_field(payload, "members").unwrap_or(0),
        banner_url: str_field(payload, "banner"),
        logo_url: str_field(payload, "logo"),
        url: str_field(payload, "url"),
        api_data: payload.clone(),
    }
}

/// Maps a roster entry. A blank handle makes the entry unusable since the
/// handle is the natural key.
pub fn map_org_member(payload: &serde_json::Value) -> Result<OrgMemberDraft, CatalogError> {
    let handle = str_field(payload, "handle").trim().to_string();
    if handle.is_empty() {
        return Err(CatalogError::MissingField("handle"));
    }

    Ok(OrgMemberDraft {
        display_name: match str_field(payload, "display_name") {
            name if name.trim().is_empty() => handle.clone(),
            name => name,
        },
        handle,
        rank: str_field(payload, "rank"),
        stars: i32_field(payload, "stars").unwrap_or(0).clamp(0, 5),
        avatar_url: str_field(payload, "image"),
        api_data: payload.clone(),
    })
}

fn str_field(payload: &serde_json::Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Numeric specs arrive as numbers or numeric strings depending on the
// upstream endpoint, so both shapes are accepted.
fn f64_field(payload: &serde_json::Value, key: &str) -> Option<f64> {
    let value = payload.get(key)?;

    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|raw| raw.trim().parse().ok()))
}

fn i64_field(payload: &serde_json::Value, key: &str) -> Option<i64> {
    let value = payload.get(key)?;

    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|raw| raw.trim().parse().ok()))
}

fn i32_field(payload: &serde_json::Value, key: &str) -> Option<i32> {
    i64_field(payload, key).and_then(|value| i32::try_from(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod decide {
        use super::*;

        #[test]
        fn absent_rows_are_created_regardless_of_force() {
            assert_eq!(decide(false, false), Outcome::Create);
            assert_eq!(decide(false, true), Outcome::Create);
        }

        #[test]
        fn present_rows_are_skipped_unless_forced() {
            assert_eq!(decide(true, false), Outcome::Skip);
            assert_eq!(decide(true, true), Outcome::Update);
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn known_sizes_map_to_their_bucket() {
            assert_eq!(normalize_size("Small"), ShipSize::Small);
            assert_eq!(normalize_size("snub fighter"), ShipSize::Snub);
            assert_eq!(normalize_size("CAPITAL"), ShipSize::Capital);
        }

        #[test]
        fn unknown_sizes_map_to_the_unknown_bucket() {
            assert_eq!(normalize_size("gigantic"), ShipSize::Unknown);
            assert_eq!(normalize_size(""), ShipSize::Unknown);
        }

        #[test]
        fn production_status_maps_with_unknown_fallback() {
            assert_eq!(
                normalize_production_status("flight-ready"),
                ProductionStatus::FlightReady
            );
            assert_eq!(
                normalize_production_status("Concept"),
                ProductionStatus::InConcept
            );
            assert_eq!(
                normalize_production_status("mystery"),
                ProductionStatus::Unknown
            );
        }
    }

    mod map_ship {
        use super::*;

        #[test]
        fn maps_a_full_payload() {
            let payload = serde_json::json!({
                "id": 42,
                "name": "Sabre",
                "model": "Sabre",
                "type": "Fighter",
                "size": "small",
                "focus": "Stealth Fighter",
                "description": "A dedicated dogfighter.",
                "length": "24.0",
                "beam": 26.0,
                "cargo": 0,
                "max_speed": 1110,
                "crew": {"min": 1, "max": 1},
                "media": {"image": "https://media.example/sabre.jpg"},
                "production_status": "flight-ready",
                "manufacturer": {"code": "AEGS", "name": "Aegis Dynamics"},
            });

            let (manufacturer, ship, components) = map_ship(&payload).unwrap();

            assert_eq!(manufacturer.code, "AEGS");
            assert_eq!(ship.external_id, Some(42));
            assert_eq!(ship.size, ShipSize::Small);
            assert_eq!(ship.length, Some(24.0));
            assert_eq!(ship.beam, Some(26.0));
            assert_eq!(ship.crew_min, Some(1));
            assert_eq!(ship.image_url, "https://media.example/sabre.jpg");
            assert_eq!(ship.production_status, ProductionStatus::FlightReady);
            assert!(components.is_empty());
            // The raw payload is retained untouched.
            assert_eq!(ship.api_data, payload);
        }

        #[test]
        fn missing_name_is_rejected() {
            let payload = serde_json::json!({"model": "Sabre"});

            let result = map_ship(&payload);

            assert!(matches!(result, Err(CatalogError::MissingField("name"))));
        }

        #[test]
        fn model_falls_back_to_name() {
            let payload = serde_json::json!({"name": "Sabre"});

            let (_, ship, _) = map_ship(&payload).unwrap();

            assert_eq!(ship.model, "Sabre");
        }

        #[test]
        fn absent_manufacturer_gets_the_unknown_stub() {
            let payload = serde_json::json!({"name": "Mystery Ship"});

            let (manufacturer, _, _) = map_ship(&payload).unwrap();

            assert_eq!(manufacturer.code, "UNK");
            assert_eq!(manufacturer.name, "Unknown");
        }
    }

    mod map_org_member {
        use super::*;

        #[test]
        fn blank_handle_is_rejected() {
            let payload = serde_json::json!({"handle": "   ", "display_name": "Ghost"});

            let result = map_org_member(&payload);

            assert!(matches!(result, Err(CatalogError::MissingField("handle"))));
        }

        #[test]
        fn display_name_falls_back_to_handle() {
            let payload = serde_json::json!({"handle": "kirk", "stars": 7});

            let member = map_org_member(&payload).unwrap();

            assert_eq!(member.display_name, "kirk");
            // Stars are clamped into the valid range.
            assert_eq!(member.stars, 5);
        }
    }
}
