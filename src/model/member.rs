use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Member profile as exposed to API consumers
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MemberDto {
    pub id: i32,
    pub discord_id: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub rank: String,
    pub missions_completed: serde_json::Value,
    pub trainings_completed: serde_json::Value,
    pub stats: serde_json::Value,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::member::Model> for MemberDto {
    fn from(member: entity::member::Model) -> Self {
        Self {
            id: member.id,
            discord_id: member.discord_id,
            display_name: member.display_name,
            bio: member.bio,
            avatar_url: member.avatar_url,
            rank: member.rank,
            missions_completed: member.missions_completed,
            trainings_completed: member.trainings_completed,
            stats: member.stats,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// Partial profile update; absent fields are left untouched
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MemberUpdateDto {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub missions_completed: Option<serde_json::Value>,
    pub trainings_completed: Option<serde_json::Value>,
    pub stats: Option<serde_json::Value>,
}
