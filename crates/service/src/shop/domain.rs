use chrono::{DateTime, FixedOffset};
use models::errors::{FieldErrors, MSG_REQUIRED};
use models::shop::{self, NewShop, ShopChanges, WithVendor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shop fields as sent by a client. Unknown keys (including `vendor`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopInput {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub business_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial updates reuse the create payload; absent fields stay unchanged.
pub type ShopPatch = ShopInput;

impl ShopInput {
    /// Validate a full payload. Every field is required.
    pub fn into_new_shop(self) -> Result<NewShop, FieldErrors> {
        let mut errs = FieldErrors::default();
        let changes = self.check(&mut errs, true);
        match changes {
            ShopChanges {
                name: Some(name),
                owner: Some(owner),
                business_type: Some(business_type),
                latitude: Some(latitude),
                longitude: Some(longitude),
            } if errs.is_empty() => Ok(NewShop { name, owner, business_type, latitude, longitude }),
            _ => Err(errs),
        }
    }

    /// Validate only the fields that are present.
    pub fn into_changes(self) -> Result<ShopChanges, FieldErrors> {
        let mut errs = FieldErrors::default();
        let changes = self.check(&mut errs, false);
        errs.into_result(changes)
    }

    fn check(self, errs: &mut FieldErrors, required: bool) -> ShopChanges {
        fn text(errs: &mut FieldErrors, field: &str, v: Option<String>, max: usize, required: bool) -> Option<String> {
            match v {
                None => {
                    if required {
                        errs.add(field, MSG_REQUIRED);
                    }
                    None
                }
                Some(raw) => shop::validate_text(&raw, max).map_err(|m| errs.add(field, m)).ok(),
            }
        }
        fn coord(errs: &mut FieldErrors, field: &str, v: Option<f64>, check: fn(f64) -> Result<f64, String>, required: bool) -> Option<f64> {
            match v {
                None => {
                    if required {
                        errs.add(field, MSG_REQUIRED);
                    }
                    None
                }
                Some(raw) => check(raw).map_err(|m| errs.add(field, m)).ok(),
            }
        }
        ShopChanges {
            name: text(errs, "name", self.name, shop::NAME_MAX, required),
            owner: text(errs, "owner", self.owner, shop::OWNER_MAX, required),
            business_type: text(errs, "business_type", self.business_type, shop::BUSINESS_TYPE_MAX, required),
            latitude: coord(errs, "latitude", self.latitude, shop::validate_latitude, required),
            longitude: coord(errs, "longitude", self.longitude, shop::validate_longitude, required),
        }
    }
}

/// Shop as returned to its owner. `vendor` and `vendor_name` are read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub vendor: Uuid,
    pub vendor_name: String,
}

impl From<WithVendor> for Shop {
    fn from((s, v): WithVendor) -> Self {
        Self {
            id: s.id,
            name: s.name,
            owner: s.owner,
            business_type: s.business_type,
            latitude: s.latitude,
            longitude: s.longitude,
            created_at: s.created_at,
            updated_at: s.updated_at,
            vendor: s.vendor_id,
            vendor_name: v.map(|v| v.name).unwrap_or_default(),
        }
    }
}
