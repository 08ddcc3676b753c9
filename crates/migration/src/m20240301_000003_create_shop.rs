//! Create `shop` table with FK to `vendor`.
//!
//! Coordinates are plain doubles; there is no spatial index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shop::Table)
                    .if_not_exists()
                    .col(uuid(Shop::Id).primary_key())
                    .col(uuid(Shop::VendorId).not_null())
                    .col(string_len(Shop::Name, 255).not_null())
                    .col(string_len(Shop::Owner, 255).not_null())
                    .col(string_len(Shop::BusinessType, 100).not_null())
                    .col(double(Shop::Latitude).not_null())
                    .col(double(Shop::Longitude).not_null())
                    .col(timestamp_with_time_zone(Shop::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Shop::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shop_vendor")
                            .from(Shop::Table, Shop::VendorId)
                            .to(Vendor::Table, Vendor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Shop::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Shop {
    Table,
    Id,
    VendorId,
    Name,
    Owner,
    BusinessType,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vendor {
    Table,
    Id,
}
