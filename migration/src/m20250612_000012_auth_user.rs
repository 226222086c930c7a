use sea_orm_migration::{prelude::*, schema::*};

static IDX_AUTH_USER_ROLE: &str = "idx-auth_user-role";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthUser::Id))
                    .col(string_null(AuthUser::DiscordId).unique_key())
                    .col(string_uniq(AuthUser::Username))
                    .col(string_null(AuthUser::Discriminator))
                    .col(string_null(AuthUser::Avatar))
                    .col(string_null(AuthUser::Email).unique_key())
                    .col(string_null(AuthUser::PasswordHash))
                    .col(string(AuthUser::Role))
                    .col(string_null(AuthUser::RankImage))
                    .col(boolean(AuthUser::MustChangePassword))
                    .col(boolean(AuthUser::IsActive))
                    .col(timestamp(AuthUser::CreatedAt))
                    .col(timestamp_null(AuthUser::LastLogin))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUTH_USER_ROLE)
                    .table(AuthUser::Table)
                    .col(AuthUser::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUTH_USER_ROLE)
                    .table(AuthUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuthUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AuthUser {
    Table,
    Id,
    DiscordId,
    Username,
    Discriminator,
    Avatar,
    Email,
    PasswordHash,
    Role,
    RankImage,
    MustChangePassword,
    IsActive,
    CreatedAt,
    LastLogin,
}
