use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Shop: owner-scoped listing filters on vendor_id
        manager
            .create_index(
                Index::create()
                    .name("idx_shop_vendor")
                    .table(Shop::Table)
                    .col(Shop::VendorId)
                    .to_owned(),
            )
            .await?;

        // Shop: default ordering is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_shop_created_at")
                    .table(Shop::Table)
                    .col(Shop::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_shop_vendor").table(Shop::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shop_created_at").table(Shop::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shop {
    Table,
    VendorId,
    CreatedAt,
}
