use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250612_000001_manufacturer::Manufacturer;

static IDX_SHIP_MANUFACTURER_ID: &str = "idx-ship-manufacturer_id";
static IDX_SHIP_MANUFACTURER_MODEL: &str = "idx-ship-manufacturer_id-model";
static FK_SHIP_MANUFACTURER_ID: &str = "fk-ship-manufacturer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ship::Table)
                    .if_not_exists()
                    .col(pk_auto(Ship::Id))
                    .col(integer(Ship::ManufacturerId))
                    .col(big_integer_null(Ship::ExternalId).unique_key())
                    .col(string(Ship::Model))
                    .col(string(Ship::Name))
                    .col(string(Ship::Kind))
                    .col(string(Ship::Size))
                    .col(string(Ship::Focus))
                    .col(text(Ship::Description))
                    .col(double_null(Ship::Length))
                    .col(double_null(Ship::Beam))
                    .col(double_null(Ship::Height))
                    .col(double_null(Ship::Mass))
                    .col(integer_null(Ship::CrewMin))
                    .col(integer_null(Ship::CrewMax))
                    .col(integer_null(Ship::CargoCapacity))
                    .col(integer_null(Ship::MaxSpeed))
                    .col(double_null(Ship::Price))
                    .col(string(Ship::ImageUrl))
                    .col(string(Ship::StoreUrl))
                    .col(string(Ship::ProductionStatus))
                    .col(json_binary(Ship::ApiData))
                    .col(timestamp(Ship::SyncedAt))
                    .col(timestamp(Ship::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHIP_MANUFACTURER_ID)
                    .table(Ship::Table)
                    .col(Ship::ManufacturerId)
                    .to_owned(),
            )
            .await?;

        // Natural key for reconciliation when no external id is present.
        manager
            .create_index(
                Index::create()
                    .name(IDX_SHIP_MANUFACTURER_MODEL)
                    .table(Ship::Table)
                    .col(Ship::ManufacturerId)
                    .col(Ship::Model)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SHIP_MANUFACTURER_ID)
                    .from_tbl(Ship::Table)
                    .from_col(Ship::ManufacturerId)
                    .to_tbl(Manufacturer::Table)
                    .to_col(Manufacturer::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SHIP_MANUFACTURER_ID)
                    .table(Ship::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHIP_MANUFACTURER_MODEL)
                    .table(Ship::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHIP_MANUFACTURER_ID)
                    .table(Ship::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ship::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Ship {
    Table,
    Id,
    ManufacturerId,
    ExternalId,
    Model,
    Name,
    Kind,
    Size,
    Focus,
    Description,
    Length,
    Beam,
    Height,
    Mass,
    CrewMin,
    CrewMax,
    CargoCapacity,
    MaxSpeed,
    Price,
    ImageUrl,
    StoreUrl,
    ProductionStatus,
    ApiData,
    SyncedAt,
    CreatedAt,
}
