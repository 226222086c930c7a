use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Squadron::Table)
                    .if_not_exists()
                    .col(pk_auto(Squadron::Id))
                    .col(string_uniq(Squadron::Name))
                    .col(string_uniq(Squadron::Callsign))
                    .col(text(Squadron::Description))
                    .col(string(Squadron::Motto))
                    .col(string(Squadron::Focus))
                    .col(boolean(Squadron::IsActive))
                    .col(boolean(Squadron::IsRecruiting))
                    .col(integer_null(Squadron::MaxMembers))
                    .col(string(Squadron::ColorCode))
                    .col(timestamp(Squadron::CreatedAt))
                    .col(timestamp(Squadron::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Squadron::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Squadron {
    Table,
    Id,
    Name,
    Callsign,
    Description,
    Motto,
    Focus,
    IsActive,
    IsRecruiting,
    MaxMembers,
    ColorCode,
    CreatedAt,
    UpdatedAt,
}
