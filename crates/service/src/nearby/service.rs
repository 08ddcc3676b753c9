use std::sync::Arc;

use common::geo::{haversine_km, GeoPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::query::NearbyQuery;
use crate::errors::ServiceError;
use crate::shop::domain::Shop;
use crate::shop::repository::ShopRepository;

/// Shop as returned by the nearby search. `distance` is in kilometers and
/// only exists on search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyShop {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
    pub vendor_name: String,
}

impl NearbyShop {
    fn new(shop: Shop, distance: f64) -> Self {
        Self {
            id: shop.id,
            name: shop.name,
            owner: shop.owner,
            business_type: shop.business_type,
            latitude: shop.latitude,
            longitude: shop.longitude,
            distance,
            vendor_name: shop.vendor_name,
        }
    }
}

/// Keep the shops within `radius_km` of `origin` (inclusive) and order them
/// nearest first. Equal distances keep their input order.
pub fn rank_nearby(origin: GeoPoint, radius_km: f64, shops: Vec<Shop>) -> Vec<NearbyShop> {
    let mut ranked: Vec<NearbyShop> = shops
        .into_iter()
        .filter_map(|s| {
            let d = haversine_km(origin, GeoPoint::new(s.latitude, s.longitude));
            (d <= radius_km).then(|| NearbyShop::new(s, d))
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

/// Unauthenticated search across every vendor's shops.
pub struct NearbyService<R: ShopRepository> {
    repo: Arc<R>,
}

impl<R: ShopRepository> NearbyService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self), fields(lat = query.origin.latitude, lon = query.origin.longitude, radius_km = query.radius_km))]
    pub async fn search(&self, query: &NearbyQuery) -> Result<Vec<NearbyShop>, ServiceError> {
        let shops = self.repo.all().await?;
        let scanned = shops.len();
        let ranked = rank_nearby(query.origin, query.radius_km, shops);
        debug!(scanned, matched = ranked.len(), "nearby_search");
        Ok(ranked)
    }
}
