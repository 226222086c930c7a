use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Fields for creating a squadron.
pub struct SquadronDraft {
    pub name: String,
    pub callsign: String,
    pub description: String,
    pub motto: String,
    pub focus: String,
    pub is_recruiting: bool,
    pub max_members: Option<i32>,
    pub color_code: String,
}

pub struct SquadronRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SquadronRepository<'a> {
    /// Creates a new instance of [`SquadronRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: &SquadronDraft) -> Result<entity::squadron::Model, DbErr> {
        let squadron = entity::squadron::ActiveModel {
            name: ActiveValue::Set(draft.name.clone()),
            callsign: ActiveValue::Set(draft.callsign.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            motto: ActiveValue::Set(draft.motto.clone()),
            focus: ActiveValue::Set(draft.focus.clone()),
            is_active: ActiveValue::Set(true),
            is_recruiting: ActiveValue::Set(draft.is_recruiting),
            max_members: ActiveValue::Set(draft.max_members),
            color_code: ActiveValue::Set(draft.color_code.clone()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        squadron.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::squadron::Model>, DbErr> {
        entity::prelude::Squadron::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_callsign(
        &self,
        callsign: &str,
    ) -> Result<Option<entity::squadron::Model>, DbErr> {
        entity::prelude::Squadron::find()
            .filter(entity::squadron::Column::Callsign.eq(callsign))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::squadron::Model>, DbErr> {
        entity::prelude::Squadron::find()
            .order_by_asc(entity::squadron::Column::Name)
            .all(self.db)
            .await
    }
}
