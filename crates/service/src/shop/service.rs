use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Shop, ShopInput, ShopPatch};
use super::repository::ShopRepository;
use crate::errors::ServiceError;

/// Whether an update replaces every field or only the ones supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

/// Owner-scoped shop operations. Every method takes the authenticated vendor id.
pub struct ShopService<R: ShopRepository> {
    repo: Arc<R>,
}

impl<R: ShopRepository> ShopService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, vendor_id: Uuid) -> Result<Vec<Shop>, ServiceError> {
        self.repo.list_for_vendor(vendor_id).await
    }

    /// The vendor is always the caller; any vendor in the payload was dropped at deserialization.
    #[instrument(skip(self, input), fields(vendor_id = %vendor_id))]
    pub async fn create(&self, vendor_id: Uuid, input: ShopInput) -> Result<Shop, ServiceError> {
        let new = input.into_new_shop()?;
        let shop = self.repo.insert(vendor_id, new).await?;
        info!(shop_id = %shop.id, vendor_id = %vendor_id, "shop_created");
        Ok(shop)
    }

    pub async fn get(&self, vendor_id: Uuid, id: Uuid) -> Result<Shop, ServiceError> {
        self.repo.find_owned(id, vendor_id).await?.ok_or_else(|| ServiceError::not_found("shop"))
    }

    /// Ownership is checked before the payload, so a foreign id with a bad body is still not-found.
    #[instrument(skip(self, patch), fields(vendor_id = %vendor_id, shop_id = %id))]
    pub async fn update(&self, vendor_id: Uuid, id: Uuid, patch: ShopPatch, mode: UpdateMode) -> Result<Shop, ServiceError> {
        self.get(vendor_id, id).await?;
        let changes = match mode {
            UpdateMode::Full => patch.into_new_shop()?.into(),
            UpdateMode::Partial => patch.into_changes()?,
        };
        let shop = self.repo
            .update_owned(id, vendor_id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop"))?;
        info!(shop_id = %shop.id, ?mode, "shop_updated");
        Ok(shop)
    }

    #[instrument(skip(self), fields(vendor_id = %vendor_id, shop_id = %id))]
    pub async fn delete(&self, vendor_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete_owned(id, vendor_id).await? {
            return Err(ServiceError::not_found("shop"));
        }
        info!("shop_deleted");
        Ok(())
    }
}
