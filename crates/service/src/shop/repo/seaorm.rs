use models::shop::{self, NewShop, ShopChanges};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::shop::domain::Shop;
use crate::shop::repository::ShopRepository;

pub struct SeaOrmShopRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShopRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ShopRepository for SeaOrmShopRepository {
    async fn list_for_vendor(&self, vendor_id: Uuid) -> Result<Vec<Shop>, ServiceError> {
        let rows = shop::list_by_vendor(&self.db, vendor_id).await?;
        Ok(rows.into_iter().map(Shop::from).collect())
    }

    async fn insert(&self, vendor_id: Uuid, new: NewShop) -> Result<Shop, ServiceError> {
        let created = shop::create(&self.db, vendor_id, new).await?;
        // Re-read through the join so `vendor_name` is filled in.
        let row = shop::find_owned(&self.db, created.id, vendor_id).await?;
        row.map(Shop::from).ok_or_else(|| ServiceError::not_found("shop"))
    }

    async fn find_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<Option<Shop>, ServiceError> {
        Ok(shop::find_owned(&self.db, id, vendor_id).await?.map(Shop::from))
    }

    async fn update_owned(&self, id: Uuid, vendor_id: Uuid, changes: ShopChanges) -> Result<Option<Shop>, ServiceError> {
        let Some((current, owner)) = shop::find_owned(&self.db, id, vendor_id).await? else {
            return Ok(None);
        };
        let updated = shop::apply_changes(&self.db, current, changes).await?;
        Ok(Some(Shop::from((updated, owner))))
    }

    async fn delete_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<bool, ServiceError> {
        Ok(shop::delete_owned(&self.db, id, vendor_id).await?)
    }

    async fn all(&self) -> Result<Vec<Shop>, ServiceError> {
        let rows = shop::all_with_vendor(&self.db).await?;
        Ok(rows.into_iter().map(Shop::from).collect())
    }
}
