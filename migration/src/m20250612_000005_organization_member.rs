use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250612_000004_organization::Organization;

static IDX_ORG_MEMBER_HANDLE: &str = "idx-organization_member-organization_id-handle";
static FK_ORG_MEMBER_ORGANIZATION_ID: &str = "fk-organization_member-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizationMember::Table)
                    .if_not_exists()
                    .col(pk_auto(OrganizationMember::Id))
                    .col(integer(OrganizationMember::OrganizationId))
                    .col(string(OrganizationMember::Handle))
                    .col(string(OrganizationMember::DisplayName))
                    .col(string(OrganizationMember::Rank))
                    .col(integer(OrganizationMember::Stars))
                    .col(string(OrganizationMember::AvatarUrl))
                    .col(json_binary(OrganizationMember::ApiData))
                    .col(timestamp(OrganizationMember::SyncedAt))
                    .col(timestamp(OrganizationMember::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Handle is the natural key within an organization.
        manager
            .create_index(
                Index::create()
                    .name(IDX_ORG_MEMBER_HANDLE)
                    .table(OrganizationMember::Table)
                    .col(OrganizationMember::OrganizationId)
                    .col(OrganizationMember::Handle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORG_MEMBER_ORGANIZATION_ID)
                    .from_tbl(OrganizationMember::Table)
                    .from_col(OrganizationMember::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORG_MEMBER_ORGANIZATION_ID)
                    .table(OrganizationMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ORG_MEMBER_HANDLE)
                    .table(OrganizationMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OrganizationMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OrganizationMember {
    Table,
    Id,
    OrganizationId,
    Handle,
    DisplayName,
    Rank,
    Stars,
    AvatarUrl,
    ApiData,
    SyncedAt,
    CreatedAt,
}
