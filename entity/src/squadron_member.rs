//! Squadron membership join row.
//!
//! Leaving a squadron is a soft transition (is_active=false, left_at set);
//! rows are never deleted so the membership history survives.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "squadron_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub squadron_id: i32,
    pub member_id: i32,
    pub role: SquadronRole,
    pub is_active: bool,
    pub joined_at: DateTime,
    pub left_at: Option<DateTime>,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum SquadronRole {
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "specialist")]
    Specialist,
    #[sea_orm(string_value = "lead")]
    Lead,
    #[sea_orm(string_value = "officer")]
    Officer,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::squadron::Entity",
        from = "Column::SquadronId",
        to = "super::squadron::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Squadron,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Member,
}

impl Related<super::squadron::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Squadron.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
