use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::member::MemberUpdateDto;

pub struct MemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberRepository<'a> {
    /// Creates a new instance of [`MemberRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_discord_id(
        &self,
        discord_id: &str,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::DiscordId.eq(discord_id))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .order_by_desc(entity::member::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Creates a profile on first Discord login with the default rank and
    /// empty progress fields.
    pub async fn create_from_discord(
        &self,
        discord_id: &str,
        display_name: &str,
        avatar_url: Option<String>,
    ) -> Result<entity::member::Model, DbErr> {
        let member = entity::member::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            display_name: ActiveValue::Set(display_name.to_string()),
            bio: ActiveValue::Set(None),
            avatar_url: ActiveValue::Set(avatar_url),
            rank: ActiveValue::Set("member".to_string()),
            missions_completed: ActiveValue::Set(serde_json::Value::Array(Vec::new())),
            trainings_completed: ActiveValue::Set(serde_json::Value::Array(Vec::new())),
            stats: ActiveValue::Set(serde_json::json!({})),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        member.insert(self.db).await
    }

    /// Refreshes the display fields from a repeat Discord login.
    pub async fn update_from_discord(
        &self,
        member: entity::member::Model,
        display_name: &str,
        avatar_url: Option<String>,
    ) -> Result<entity::member::Model, DbErr> {
        let mut member: entity::member::ActiveModel = member.into();
        member.display_name = ActiveValue::Set(display_name.to_string());
        member.avatar_url = ActiveValue::Set(avatar_url);
        member.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        member.update(self.db).await
    }

    /// Applies a partial profile update; absent fields are left untouched.
    pub async fn update_profile(
        &self,
        member: entity::member::Model,
        update: &MemberUpdateDto,
    ) -> Result<entity::member::Model, DbErr> {
        let mut member: entity::member::ActiveModel = member.into();

        if let Some(display_name) = &update.display_name {
            member.display_name = ActiveValue::Set(display_name.clone());
        }
        if let Some(bio) = &update.bio {
            member.bio = ActiveValue::Set(Some(bio.clone()));
        }
        if let Some(avatar_url) = &update.avatar_url {
            member.avatar_url = ActiveValue::Set(Some(avatar_url.clone()));
        }
        if let Some(missions) = &update.missions_completed {
            member.missions_completed = ActiveValue::Set(missions.clone());
        }
        if let Some(trainings) = &update.trainings_completed {
            member.trainings_completed = ActiveValue::Set(trainings.clone());
        }
        if let Some(stats) = &update.stats {
            member.stats = ActiveValue::Set(stats.clone());
        }
        member.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        member.update(self.db).await
    }

    pub async fn set_rank(
        &self,
        member: entity::member::Model,
        rank: &str,
    ) -> Result<entity::member::Model, DbErr> {
        let mut member: entity::member::ActiveModel = member.into();
        member.rank = ActiveValue::Set(rank.to_string());
        member.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        member.update(self.db).await
    }
}
