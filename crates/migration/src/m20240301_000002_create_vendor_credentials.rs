//! Create `vendor_credentials` table storing password hashes.
//! One row per vendor; removed together with the vendor.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VendorCredentials::Table)
                    .if_not_exists()
                    .col(uuid(VendorCredentials::Id).primary_key())
                    .col(uuid(VendorCredentials::VendorId).unique_key().not_null())
                    .col(string_len(VendorCredentials::PasswordHash, 255).not_null())
                    .col(string_len(VendorCredentials::PasswordAlgorithm, 64).not_null())
                    .col(timestamp_with_time_zone(VendorCredentials::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(VendorCredentials::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vendor_credentials_vendor")
                            .from(VendorCredentials::Table, VendorCredentials::VendorId)
                            .to(Vendor::Table, Vendor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VendorCredentials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VendorCredentials {
    Table,
    Id,
    VendorId,
    PasswordHash,
    PasswordAlgorithm,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vendor {
    Table,
    Id,
}
