use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturer::Table)
                    .if_not_exists()
                    .col(pk_auto(Manufacturer::Id))
                    .col(string_uniq(Manufacturer::Code))
                    .col(string(Manufacturer::Name))
                    .col(text(Manufacturer::Description))
                    .col(string(Manufacturer::LogoUrl))
                    .col(json_binary(Manufacturer::ApiData))
                    .col(timestamp(Manufacturer::SyncedAt))
                    .col(timestamp(Manufacturer::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Manufacturer::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Manufacturer {
    Table,
    Id,
    Code,
    Name,
    Description,
    LogoUrl,
    ApiData,
    SyncedAt,
    CreatedAt,
}
