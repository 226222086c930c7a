//! JSON payload factories shaped like the upstream APIs.

/// A ship payload as the Star Citizen API returns it, complete enough for
/// the field mapping to exercise every column.
pub fn ship_payload(id: i64, name: &str, manufacturer_code: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "model": name,
        "type": "Fighter",
        "size": "small",
        "focus": "Combat",
        "description": format!("The {name} in all its glory."),
        "length": 24.5,
        "beam": 16.0,
        "height": 5.0,
        "mass": 78302.0,
        "cargo": 0,
        "max_speed": 1110,
        "price": 170.0,
        "crew": {"min": 1, "max": 1},
        "media": {"image": format!("https://media.example/{name}.jpg")},
        "store_url": format!("https://robertsspaceindustries.com/pledge/ships/{name}"),
        "production_status": "flight-ready",
        "manufacturer": {
            "code": manufacturer_code,
            "name": format!("{manufacturer_code} Industries"),
            "description": "A fine shipwright.",
            "logo": format!("https://media.example/{manufacturer_code}.png"),
        },
    })
}

pub fn organization_payload(name: &str, members: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "archetype": "PMC",
        "commitment": "Regular",
        "description": "An organization of spacefarers.",
        "members": members,
        "banner": "https://media.example/banner.png",
        "logo": "https://media.example/logo.png",
        "url": "https://robertsspaceindustries.com/orgs/FAROUT",
    })
}

pub fn org_member_payload(handle: &str) -> serde_json::Value {
    serde_json::json!({
        "handle": handle,
        "display_name": handle,
        "rank": "Recruit",
        "stars": 1,
        "image": format!("https://robertsspaceindustries.com/media/{handle}.jpg"),
    })
}

/// A Discord `/users/@me` response body.
pub fn discord_profile_payload(id: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "discriminator": "0",
        "avatar": "a1b2c3d4",
        "email": format!("{username}@example.com"),
    })
}
