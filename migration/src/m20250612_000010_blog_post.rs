use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(pk_auto(BlogPost::Id))
                    .col(string(BlogPost::Title))
                    .col(string_uniq(BlogPost::Slug))
                    .col(text(BlogPost::Content))
                    .col(text(BlogPost::Excerpt))
                    .col(string(BlogPost::Author))
                    .col(boolean(BlogPost::Published))
                    .col(timestamp(BlogPost::CreatedAt))
                    .col(timestamp(BlogPost::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum BlogPost {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    Author,
    Published,
    CreatedAt,
    UpdatedAt,
}
