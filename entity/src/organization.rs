//! Organization record synced from the Star Citizen API.
//!
//! The SID is the natural key. `member_count` is recomputed from the stored
//! member rows after a member sync rather than trusted from upstream.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "organization")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sid: String,
    pub name: String,
    pub archetype: String,
    pub commitment: String,
    pub description: String,
    pub member_count: i32,
    pub banner_url: String,
    pub logo_url: String,
    pub url: String,
    pub api_data: Json,
    pub synced_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::organization_member::Entity")]
    OrganizationMember,
}

impl Related<super::organization_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
