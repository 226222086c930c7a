use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250612_000002_ship::Ship;

static IDX_SHIP_COMPONENT_SHIP_ID: &str = "idx-ship_component-ship_id";
static FK_SHIP_COMPONENT_SHIP_ID: &str = "fk-ship_component-ship_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShipComponent::Table)
                    .if_not_exists()
                    .col(pk_auto(ShipComponent::Id))
                    .col(integer(ShipComponent::ShipId))
                    .col(string(ShipComponent::Kind))
                    .col(string(ShipComponent::Name))
                    .col(string(ShipComponent::Size))
                    .col(integer(ShipComponent::Quantity))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHIP_COMPONENT_SHIP_ID)
                    .table(ShipComponent::Table)
                    .col(ShipComponent::ShipId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SHIP_COMPONENT_SHIP_ID)
                    .from_tbl(ShipComponent::Table)
                    .from_col(ShipComponent::ShipId)
                    .to_tbl(Ship::Table)
                    .to_col(Ship::Id)
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
                    .name(FK_SHIP_COMPONENT_SHIP_ID)
                    .table(ShipComponent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHIP_COMPONENT_SHIP_ID)
                    .table(ShipComponent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShipComponent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ShipComponent {
    Table,
    Id,
    ShipId,
    Kind,
    Name,
    Size,
    Quantity,
}
