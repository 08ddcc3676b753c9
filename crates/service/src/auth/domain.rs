use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input. Fields are optional so a missing one can be reported
/// next to the others instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Refresh input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshInput {
    pub refresh: Option<String>,
}

/// Profile changes. Only the display name is mutable; an `email` key in the
/// request body is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorPatch {
    pub name: Option<String>,
}

/// Domain vendor (public view, never carries the credential)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthVendor {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub vendor_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

/// Registration result: a fresh token pair plus the created vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: AuthVendor,
}
