use chrono::Utc;
use entity::squadron_member::SquadronRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

pub struct SquadronMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SquadronMemberRepository<'a> {
    /// Creates a new instance of [`SquadronMemberRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the membership row for a member in a squadron, active or not.
    pub async fn get(
        &self,
        squadron_id: i32,
        member_id: i32,
    ) -> Result<Option<entity::squadron_member::Model>, DbErr> {
        entity::prelude::SquadronMember::find()
            .filter(entity::squadron_member::Column::SquadronId.eq(squadron_id))
            .filter(entity::squadron_member::Column::MemberId.eq(member_id))
            .one(self.db)
            .await
    }

    pub async fn insert(
        &self,
        squadron_id: i32,
        member_id: i32,
        role: SquadronRole,
    ) -> Result<entity::squadron_member::Model, DbErr> {
        let membership = entity::squadron_member::ActiveModel {
            squadron_id: ActiveValue::Set(squadron_id),
            member_id: ActiveValue::Set(member_id),
            role: ActiveValue::Set(role),
            is_active: ActiveValue::Set(true),
            joined_at: ActiveValue::Set(Utc::now().naive_utc()),
            left_at: ActiveValue::Set(None),
            notes: ActiveValue::Set(String::new()),
            ..Default::default()
        };

        membership.insert(self.db).await
    }

    /// Reactivates a soft-left membership instead of inserting a second row
    /// for the same (squadron, member) pair.
    pub async fn reactivate(
        &self,
        membership: entity::squadron_member::Model,
        role: SquadronRole,
    ) -> Result<entity::squadron_member::Model, DbErr> {
        let mut membership: entity::squadron_member::ActiveModel = membership.into();
        membership.role = ActiveValue::Set(role);
        membership.is_active = ActiveValue::Set(true);
        membership.joined_at = ActiveValue::Set(Utc::now().naive_utc());
        membership.left_at = ActiveValue::Set(None);

        membership.update(self.db).await
    }

    /// Soft transition out of the squadron. The row is kept with
    /// is_active=false and the leave timestamp set.
    pub async fn leave(
        &self,
        membership: entity::squadron_member::Model,
    ) -> Result<entity::squadron_member::Model, DbErr> {
        let mut membership: entity::squadron_member::ActiveModel = membership.into();
        membership.is_active = ActiveValue::Set(false);
        membership.left_at = ActiveValue::Set(Some(Utc::now().naive_utc()));

        membership.update(self.db).await
    }

    pub async fn count_active(&self, squadron_id: i32) -> Result<u64, DbErr> {
        entity::prelude::SquadronMember::find()
            .filter(entity::squadron_member::Column::SquadronId.eq(squadron_id))
            .filter(entity::squadron_member::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    pub async fn active_members(
        &self,
        squadron_id: i32,
    ) -> Result<Vec<entity::squadron_member::Model>, DbErr> {
        entity::prelude::SquadronMember::find()
            .filter(entity::squadron_member::Column::SquadronId.eq(squadron_id))
            .filter(entity::squadron_member::Column::IsActive.eq(true))
            .all(self.db)
            .await
    }
}
