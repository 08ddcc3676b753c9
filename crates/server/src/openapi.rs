use std::collections::BTreeMap;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
    /// Per-field validation messages
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct RefreshRequest { pub refresh: String }

#[derive(ToSchema)]
pub struct ProfileUpdateRequest { pub name: Option<String> }

#[derive(ToSchema)]
pub struct VendorDoc { pub id: Uuid, pub email: String, pub name: String }

#[derive(ToSchema)]
pub struct TokenPairDoc { pub access: String, pub refresh: String }

#[derive(ToSchema)]
pub struct AccessTokenDoc { pub access: String }

#[derive(ToSchema)]
pub struct RegistrationDoc { pub access: String, pub refresh: String, pub user: VendorDoc }

#[derive(ToSchema)]
pub struct ShopRequest {
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(ToSchema)]
pub struct ShopPatchRequest {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub business_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(ToSchema)]
pub struct ShopDoc {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
    pub vendor: Uuid,
    pub vendor_name: String,
}

#[derive(ToSchema)]
pub struct NearbyShopDoc {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub business_type: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometers from the query point
    pub distance: f64,
    pub vendor_name: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::register,
        crate::routes::accounts::login,
        crate::routes::accounts::refresh,
        crate::routes::accounts::profile,
        crate::routes::accounts::update_profile,
        crate::routes::shops::list,
        crate::routes::shops::create,
        crate::routes::shops::get,
        crate::routes::shops::update,
        crate::routes::shops::partial_update,
        crate::routes::shops::delete,
        crate::routes::nearby::nearby_shops,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            ProfileUpdateRequest,
            VendorDoc,
            TokenPairDoc,
            AccessTokenDoc,
            RegistrationDoc,
            ShopRequest,
            ShopPatchRequest,
            ShopDoc,
            NearbyShopDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "shops"),
        (name = "nearby")
    )
)]
pub struct ApiDoc;
