//! Member profile stored in the app database.
//!
//! Linked to an auth account only by the shared Discord id; the auth store is
//! a separate database so there is no foreign key between the two.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub discord_id: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub rank: String,
    pub missions_completed: Json,
    pub trainings_completed: Json,
    pub stats: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fleet_ship::Entity")]
    FleetShip,
    #[sea_orm(has_many = "super::squadron_member::Entity")]
    SquadronMember,
}

impl Related<super::fleet_ship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetShip.def()
    }
}

impl Related<super::squadron_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SquadronMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
