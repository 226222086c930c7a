use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

pub struct ItemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ItemRepository<'a> {
    /// Creates a new instance of [`ItemRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<entity::item::Model>, DbErr> {
        entity::prelude::Item::find()
            .order_by_desc(entity::item::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(&self, title: &str) -> Result<entity::item::Model, DbErr> {
        let item = entity::item::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        item.insert(self.db).await
    }
}
