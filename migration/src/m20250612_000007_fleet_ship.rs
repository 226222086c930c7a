use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250612_000002_ship::Ship, m20250612_000006_member::Member};

static IDX_FLEET_SHIP_MEMBER_ID: &str = "idx-fleet_ship-member_id";
static IDX_FLEET_SHIP_SHIP_ID: &str = "idx-fleet_ship-ship_id";
static FK_FLEET_SHIP_SHIP_ID: &str = "fk-fleet_ship-ship_id";
static FK_FLEET_SHIP_MEMBER_ID: &str = "fk-fleet_ship-member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FleetShip::Table)
                    .if_not_exists()
                    .col(pk_auto(FleetShip::Id))
                    .col(integer(FleetShip::ShipId))
                    .col(integer(FleetShip::MemberId))
                    .col(string(FleetShip::Name))
                    .col(integer(FleetShip::Quantity))
                    .col(string(FleetShip::Status))
                    .col(date_null(FleetShip::PurchasedDate))
                    .col(text(FleetShip::Notes))
                    .col(timestamp(FleetShip::CreatedAt))
                    .col(timestamp(FleetShip::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FLEET_SHIP_MEMBER_ID)
                    .table(FleetShip::Table)
                    .col(FleetShip::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FLEET_SHIP_SHIP_ID)
                    .table(FleetShip::Table)
                    .col(FleetShip::ShipId)
                    .to_owned(),
            )
            .await?;

        // Restrict keeps catalog ships from being deleted while fleet
        // records still reference them.
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_FLEET_SHIP_SHIP_ID)
                    .from_tbl(FleetShip::Table)
                    .from_col(FleetShip::ShipId)
                    .to_tbl(Ship::Table)
                    .to_col(Ship::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_FLEET_SHIP_MEMBER_ID)
                    .from_tbl(FleetShip::Table)
                    .from_col(FleetShip::MemberId)
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
                    .name(FK_FLEET_SHIP_MEMBER_ID)
                    .table(FleetShip::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_FLEET_SHIP_SHIP_ID)
                    .table(FleetShip::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FLEET_SHIP_SHIP_ID)
                    .table(FleetShip::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FLEET_SHIP_MEMBER_ID)
                    .table(FleetShip::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FleetShip::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum FleetShip {
    Table,
    Id,
    ShipId,
    MemberId,
    Name,
    Quantity,
    Status,
    PurchasedDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}
