use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::Id))
                    .col(string_uniq(Member::DiscordId))
                    .col(string(Member::DisplayName))
                    .col(text_null(Member::Bio))
                    .col(string_null(Member::AvatarUrl))
                    .col(string(Member::Rank))
                    .col(json_binary(Member::MissionsCompleted))
                    .col(json_binary(Member::TrainingsCompleted))
                    .col(json_binary(Member::Stats))
                    .col(timestamp(Member::CreatedAt))
                    .col(timestamp(Member::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Member {
    Table,
    Id,
    DiscordId,
    DisplayName,
    Bio,
    AvatarUrl,
    Rank,
    MissionsCompleted,
    TrainingsCompleted,
    Stats,
    CreatedAt,
    UpdatedAt,
}
