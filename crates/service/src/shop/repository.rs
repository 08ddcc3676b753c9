use async_trait::async_trait;
use models::shop::{NewShop, ShopChanges};
use uuid::Uuid;

use super::domain::Shop;
use crate::errors::ServiceError;

/// Repository abstraction for shop persistence. Reads by id are owner-scoped.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// The vendor's shops, newest first.
    async fn list_for_vendor(&self, vendor_id: Uuid) -> Result<Vec<Shop>, ServiceError>;
    async fn insert(&self, vendor_id: Uuid, new: NewShop) -> Result<Shop, ServiceError>;
    async fn find_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<Option<Shop>, ServiceError>;
    /// `None` when no shop `(id, vendor_id)` exists.
    async fn update_owned(&self, id: Uuid, vendor_id: Uuid, changes: ShopChanges) -> Result<Option<Shop>, ServiceError>;
    async fn delete_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<bool, ServiceError>;
    /// Every shop of every vendor, in listing order.
    async fn all(&self) -> Result<Vec<Shop>, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    #[derive(Default)]
    pub struct MockShopRepository {
        shops: Mutex<Vec<Shop>>, // insertion order
        vendor_names: Mutex<HashMap<Uuid, String>>,
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
        m.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
    }

    impl MockShopRepository {
        /// Register a display name reported as `vendor_name` for the vendor's shops.
        pub fn with_vendor(self, id: Uuid, name: &str) -> Self {
            if let Ok(mut names) = self.vendor_names.lock() {
                names.insert(id, name.to_string());
            }
            self
        }

        /// Seed a shop directly, bypassing validation.
        pub fn push(&self, shop: Shop) -> Result<(), ServiceError> {
            lock(&self.shops)?.push(shop);
            Ok(())
        }
    }

    #[async_trait]
    impl ShopRepository for MockShopRepository {
        async fn list_for_vendor(&self, vendor_id: Uuid) -> Result<Vec<Shop>, ServiceError> {
            Ok(lock(&self.shops)?.iter().rev().filter(|s| s.vendor == vendor_id).cloned().collect())
        }

        async fn insert(&self, vendor_id: Uuid, new: NewShop) -> Result<Shop, ServiceError> {
            let vendor_name = lock(&self.vendor_names)?.get(&vendor_id).cloned().unwrap_or_default();
            let now = Utc::now().fixed_offset();
            let shop = Shop {
                id: Uuid::new_v4(),
                name: new.name,
                owner: new.owner,
                business_type: new.business_type,
                latitude: new.latitude,
                longitude: new.longitude,
                created_at: now,
                updated_at: now,
                vendor: vendor_id,
                vendor_name,
            };
            lock(&self.shops)?.push(shop.clone());
            Ok(shop)
        }

        async fn find_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<Option<Shop>, ServiceError> {
            Ok(lock(&self.shops)?.iter().find(|s| s.id == id && s.vendor == vendor_id).cloned())
        }

        async fn update_owned(&self, id: Uuid, vendor_id: Uuid, changes: ShopChanges) -> Result<Option<Shop>, ServiceError> {
            let mut shops = lock(&self.shops)?;
            let Some(s) = shops.iter_mut().find(|s| s.id == id && s.vendor == vendor_id) else {
                return Ok(None);
            };
            if let Some(v) = changes.name {
                s.name = v;
            }
            if let Some(v) = changes.owner {
                s.owner = v;
            }
            if let Some(v) = changes.business_type {
                s.business_type = v;
            }
            if let Some(v) = changes.latitude {
                s.latitude = v;
            }
            if let Some(v) = changes.longitude {
                s.longitude = v;
            }
            s.updated_at = Utc::now().fixed_offset();
            Ok(Some(s.clone()))
        }

        async fn delete_owned(&self, id: Uuid, vendor_id: Uuid) -> Result<bool, ServiceError> {
            let mut shops = lock(&self.shops)?;
            let before = shops.len();
            shops.retain(|s| !(s.id == id && s.vendor == vendor_id));
            Ok(shops.len() != before)
        }

        async fn all(&self) -> Result<Vec<Shop>, ServiceError> {
            Ok(lock(&self.shops)?.iter().rev().cloned().collect())
        }
    }
}
