use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, FieldErrors, ModelError, MSG_BLANK, MSG_REQUIRED};
use crate::shop;

pub const EMAIL_MAX: usize = 254;
pub const NAME_MAX: usize = 255;
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Shop,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Shop => Entity::has_many(shop::Entity).into(),
        }
    }
}

impl Related<shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trim the address and lower-case its domain part.
///
/// Returns the message to report under the `email` field when the address
/// is blank or malformed.
pub fn normalize_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(MSG_BLANK);
    }
    if email.len() > EMAIL_MAX || email.chars().any(char::is_whitespace) {
        return Err(MSG_INVALID_EMAIL);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(MSG_INVALID_EMAIL);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(MSG_INVALID_EMAIL);
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(MSG_INVALID_EMAIL);
    }
    Ok(format!("{local}@{}", domain.to_lowercase()))
}

/// Trimmed display name, or the message to report under `name`.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(MSG_BLANK.into());
    }
    if name.chars().count() > NAME_MAX {
        return Err(format!("Ensure this field has no more than {NAME_MAX} characters."));
    }
    Ok(name.to_string())
}

/// Validate raw registration fields into `(email, name)`.
pub fn validate_new(email: Option<&str>, name: Option<&str>) -> Result<(String, String), FieldErrors> {
    let mut errs = FieldErrors::default();
    let email = match email.map(normalize_email) {
        None => {
            errs.add("email", MSG_REQUIRED);
            None
        }
        Some(Err(m)) => {
            errs.add("email", m);
            None
        }
        Some(Ok(e)) => Some(e),
    };
    let name = match name.map(validate_name) {
        None => {
            errs.add("name", MSG_REQUIRED);
            None
        }
        Some(Err(m)) => {
            errs.add("name", m);
            None
        }
        Some(Ok(n)) => Some(n),
    };
    match (email, name) {
        (Some(e), Some(n)) if errs.is_empty() => Ok((e, n)),
        _ => Err(errs),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str, name: &str) -> Result<Model, errors::ModelError> {
    let (email, name) = validate_new(Some(email), Some(name)).map_err(ModelError::Validation)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

/// Change the display name. Email is never touched here.
pub async fn update_name<C: ConnectionTrait>(db: &C, id: Uuid, name: &str) -> Result<Model, errors::ModelError> {
    let name = validate_name(name).map_err(|m| ModelError::Validation(FieldErrors::single("name", m)))?;
    let mut found: ActiveModel = Entity::find_by_id(id).one(db).await?.ok_or(ModelError::NotFound("vendor"))?.into();
    found.name = Set(name);
    found.updated_at = Set(Utc::now().into());
    Ok(found.update(db).await?)
}

/// Remove the vendor; shops and credentials go with it through FK cascade.
pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("  Bob@Example.COM "), Ok("Bob@example.com".to_string()));
    }

    #[test]
    fn normalize_email_rejects_malformed() {
        for bad in ["bob", "bob@", "@x.com", "a@b", "a@@x.com", "a b@x.com", "a@x..com", "a@.com"] {
            assert_eq!(normalize_email(bad), Err(MSG_INVALID_EMAIL), "accepted {bad:?}");
        }
        assert_eq!(normalize_email("   "), Err(MSG_BLANK));
    }

    #[test]
    fn validate_new_reports_every_field() {
        let errs = validate_new(None, Some("  ")).unwrap_err();
        assert_eq!(errs.get("email"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert_eq!(errs.get("name"), Some(&[MSG_BLANK.to_string()][..]));
    }
}
