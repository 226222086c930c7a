use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(pk_auto(Organization::Id))
                    .col(string_uniq(Organization::Sid))
                    .col(string(Organization::Name))
                    .col(string(Organization::Archetype))
                    .col(string(Organization::Commitment))
                    .col(text(Organization::Description))
                    .col(integer(Organization::MemberCount))
                    .col(string(Organization::BannerUrl))
                    .col(string(Organization::LogoUrl))
                    .col(string(Organization::Url))
                    .col(json_binary(Organization::ApiData))
                    .col(timestamp(Organization::SyncedAt))
                    .col(timestamp(Organization::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Organization {
    Table,
    Id,
    Sid,
    Name,
    Archetype,
    Commitment,
    Description,
    MemberCount,
    BannerUrl,
    LogoUrl,
    Url,
    ApiData,
    SyncedAt,
    CreatedAt,
}
