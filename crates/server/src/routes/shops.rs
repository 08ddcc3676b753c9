use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use service::auth::domain::AuthVendor;
use service::shop::{service::UpdateMode, Shop, ShopInput, ShopPatch};
use uuid::Uuid;

use crate::{errors::JsonApiError, extract::ApiJson, routes::auth::ServerState};

/// A malformed id cannot name an owned shop, so it is reported like a missing one.
fn shop_id(raw: &str) -> Result<Uuid, JsonApiError> {
    Uuid::parse_str(raw).map_err(|_| JsonApiError::not_found("shop not found"))
}

#[utoipa::path(
    get, path = "/shops", tag = "shops",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The caller's shops, newest first", body = [crate::openapi::ShopDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>, Extension(vendor): Extension<AuthVendor>) -> Result<Json<Vec<Shop>>, JsonApiError> {
    let shops = state.shops.list(vendor.id).await?;
    tracing::info!(vendor_id = %vendor.id, count = shops.len(), "list shops");
    Ok(Json(shops))
}

#[utoipa::path(
    post, path = "/shops", tag = "shops",
    security(("bearer" = [])),
    request_body = crate::openapi::ShopRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ShopDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    ApiJson(input): ApiJson<ShopInput>,
) -> Result<(StatusCode, Json<Shop>), JsonApiError> {
    let shop = state.shops.create(vendor.id, input).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

#[utoipa::path(
    get, path = "/shops/{id}", tag = "shops",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ShopDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    Path(id): Path<String>,
) -> Result<Json<Shop>, JsonApiError> {
    Ok(Json(state.shops.get(vendor.id, shop_id(&id)?).await?))
}

#[utoipa::path(
    put, path = "/shops/{id}", tag = "shops",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = crate::openapi::ShopRequest,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::ShopDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ShopPatch>,
) -> Result<Json<Shop>, JsonApiError> {
    let id = shop_id(&id)?;
    Ok(Json(state.shops.update(vendor.id, id, patch, UpdateMode::Full).await?))
}

#[utoipa::path(
    patch, path = "/shops/{id}", tag = "shops",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = crate::openapi::ShopPatchRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShopDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn partial_update(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ShopPatch>,
) -> Result<Json<Shop>, JsonApiError> {
    let id = shop_id(&id)?;
    Ok(Json(state.shops.update(vendor.id, id, patch, UpdateMode::Partial).await?))
}

#[utoipa::path(
    delete, path = "/shops/{id}", tag = "shops",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.shops.delete(vendor.id, shop_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
