//! Squadron sub-group within the organization.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "squadron")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub callsign: String,
    pub description: String,
    pub motto: String,
    pub focus: String,
    pub is_active: bool,
    pub is_recruiting: bool,
    /// None means no capacity ceiling.
    pub max_members: Option<i32>,
    pub color_code: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::squadron_member::Entity")]
    SquadronMember,
}

impl Related<super::squadron_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SquadronMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
