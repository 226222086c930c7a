use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250612_000006_member::Member, m20250612_000008_squadron::Squadron};

static IDX_SQUADRON_MEMBER_UNIQUE: &str = "idx-squadron_member-squadron_id-member_id";
static FK_SQUADRON_MEMBER_SQUADRON_ID: &str = "fk-squadron_member-squadron_id";
static FK_SQUADRON_MEMBER_MEMBER_ID: &str = "fk-squadron_member-member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SquadronMember::Table)
                    .if_not_exists()
                    .col(pk_auto(SquadronMember::Id))
                    .col(integer(SquadronMember::SquadronId))
                    .col(integer(SquadronMember::MemberId))
                    .col(string(SquadronMember::Role))
                    .col(boolean(SquadronMember::IsActive))
                    .col(timestamp(SquadronMember::JoinedAt))
                    .col(timestamp_null(SquadronMember::LeftAt))
                    .col(text(SquadronMember::Notes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SQUADRON_MEMBER_UNIQUE)
                    .table(SquadronMember::Table)
                    .col(SquadronMember::SquadronId)
                    .col(SquadronMember::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SQUADRON_MEMBER_SQUADRON_ID)
                    .from_tbl(SquadronMember::Table)
                    .from_col(SquadronMember::SquadronId)
                    .to_tbl(Squadron::Table)
                    .to_col(Squadron::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SQUADRON_MEMBER_MEMBER_ID)
                    .from_tbl(SquadronMember::Table)
                    .from_col(SquadronMember::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
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
                    .name(FK_SQUADRON_MEMBER_MEMBER_ID)
                    .table(SquadronMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SQUADRON_MEMBER_SQUADRON_ID)
                    .table(SquadronMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SQUADRON_MEMBER_UNIQUE)
                    .table(SquadronMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SquadronMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SquadronMember {
    Table,
    Id,
    SquadronId,
    MemberId,
    Role,
    IsActive,
    JoinedAt,
    LeftAt,
    Notes,
}
