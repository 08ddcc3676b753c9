use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, MSG_BLANK};
use crate::vendor;

pub const NAME_MAX: usize = 255;
pub const OWNER_MAX: usize = 255;
pub const BUSINESS_TYPE_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vendor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vendor => Entity::belongs_to(vendor::Entity)
                .from(Column::VendorId)
                .to(vendor::Column::Id)
                .into(),
        }
    }
}

impl Related<vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A shop row paired with its owning vendor, when the join found one.
pub type WithVendor = (Model, Option<vendor::Model>);

/// Validated fields for a new shop. The vendor is supplied separately.
#[derive(Clone, Debug, PartialEq)]
pub struct NewShop {
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Validated subset of mutable fields; `None` leaves the column unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShopChanges {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub business_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<NewShop> for ShopChanges {
    fn from(n: NewShop) -> Self {
        Self {
            name: Some(n.name),
            owner: Some(n.owner),
            business_type: Some(n.business_type),
            latitude: Some(n.latitude),
            longitude: Some(n.longitude),
        }
    }
}

impl ShopChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.owner.is_none()
            && self.business_type.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

/// Trimmed, non-blank text no longer than `max` characters.
pub fn validate_text(raw: &str, max: usize) -> Result<String, String> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(MSG_BLANK.into());
    }
    if v.chars().count() > max {
        return Err(format!("Ensure this field has no more than {max} characters."));
    }
    Ok(v.to_string())
}

pub fn validate_latitude(v: f64) -> Result<f64, String> {
    if !v.is_finite() || !(-90.0..=90.0).contains(&v) {
        return Err("Ensure this value is between -90 and 90.".into());
    }
    Ok(v)
}

pub fn validate_longitude(v: f64) -> Result<f64, String> {
    if !v.is_finite() || !(-180.0..=180.0).contains(&v) {
        return Err("Ensure this value is between -180 and 180.".into());
    }
    Ok(v)
}

pub async fn create<C: ConnectionTrait>(db: &C, vendor_id: Uuid, new: NewShop) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        vendor_id: Set(vendor_id),
        name: Set(new.name),
        owner: Set(new.owner),
        business_type: Set(new.business_type),
        latitude: Set(new.latitude),
        longitude: Set(new.longitude),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// The vendor's shops, newest first.
pub async fn list_by_vendor<C: ConnectionTrait>(db: &C, vendor_id: Uuid) -> Result<Vec<WithVendor>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::VendorId.eq(vendor_id))
        .order_by_desc(Column::CreatedAt)
        .find_also_related(vendor::Entity)
        .all(db)
        .await?)
}

/// Every shop across all vendors, newest first.
pub async fn all_with_vendor<C: ConnectionTrait>(db: &C) -> Result<Vec<WithVendor>, errors::ModelError> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .find_also_related(vendor::Entity)
        .all(db)
        .await?)
}

/// Fetch-if-owned: matches on the `(id, vendor_id)` pair in one query, so a
/// shop owned by someone else is indistinguishable from a missing one.
pub async fn find_owned<C: ConnectionTrait>(db: &C, id: Uuid, vendor_id: Uuid) -> Result<Option<WithVendor>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::VendorId.eq(vendor_id))
        .find_also_related(vendor::Entity)
        .one(db)
        .await?)
}

/// Apply `changes` to an already-fetched row and refresh `updated_at`.
pub async fn apply_changes<C: ConnectionTrait>(db: &C, current: Model, changes: ShopChanges) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = current.into();
    if let Some(v) = changes.name {
        am.name = Set(v);
    }
    if let Some(v) = changes.owner {
        am.owner = Set(v);
    }
    if let Some(v) = changes.business_type {
        am.business_type = Set(v);
    }
    if let Some(v) = changes.latitude {
        am.latitude = Set(v);
    }
    if let Some(v) = changes.longitude {
        am.longitude = Set(v);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Delete only when the row belongs to `vendor_id`. Returns whether a row went away.
pub async fn delete_owned<C: ConnectionTrait>(db: &C, id: Uuid, vendor_id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::VendorId.eq(vendor_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, errors::ModelError> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().count(db).await?)
}
