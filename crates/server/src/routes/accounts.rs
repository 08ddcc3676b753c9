use axum::{extract::State, http::StatusCode, Extension, Json};
use service::auth::domain::{AccessToken, AuthVendor, LoginInput, RefreshInput, Registration, RegisterInput, TokenPair, VendorPatch};
use service::auth::errors::AuthError;

use crate::{errors::JsonApiError, extract::ApiJson, routes::auth::ServerState};

pub const MSG_LOGIN_FAILED: &str = "No active account found with the given credentials";
pub const MSG_REFRESH_INVALID: &str = "Token is invalid or expired";

#[utoipa::path(
    post, path = "/accounts/register", tag = "accounts",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::RegistrationDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn register(State(state): State<ServerState>, ApiJson(input): ApiJson<RegisterInput>) -> Result<(StatusCode, Json<Registration>), JsonApiError> {
    let reg = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(reg)))
}

#[utoipa::path(
    post, path = "/accounts/login", tag = "accounts",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::TokenPairDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<TokenPair>, JsonApiError> {
    match state.auth.login(input).await {
        Ok(pair) => Ok(Json(pair)),
        Err(AuthError::Unauthorized) => Err(JsonApiError::unauthorized(MSG_LOGIN_FAILED)),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post, path = "/accounts/token/refresh", tag = "accounts",
    request_body = crate::openapi::RefreshRequest,
    responses(
        (status = 200, description = "Refreshed", body = crate::openapi::AccessTokenDoc),
        (status = 401, description = "Invalid or expired refresh token", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn refresh(State(state): State<ServerState>, ApiJson(input): ApiJson<RefreshInput>) -> Result<Json<AccessToken>, JsonApiError> {
    match state.auth.refresh(input).await {
        Ok(token) => Ok(Json(token)),
        Err(AuthError::Unauthorized) => Err(JsonApiError::unauthorized(MSG_REFRESH_INVALID)),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/accounts/profile", tag = "accounts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VendorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn profile(State(state): State<ServerState>, Extension(vendor): Extension<AuthVendor>) -> Result<Json<AuthVendor>, JsonApiError> {
    Ok(Json(state.auth.profile(vendor.id).await?))
}

/// PUT and PATCH behave the same: only `name` is applied, `email` is ignored.
#[utoipa::path(
    put, path = "/accounts/profile", tag = "accounts",
    security(("bearer" = [])),
    request_body = crate::openapi::ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::VendorDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(vendor): Extension<AuthVendor>,
    ApiJson(patch): ApiJson<VendorPatch>,
) -> Result<Json<AuthVendor>, JsonApiError> {
    Ok(Json(state.auth.update_profile(vendor.id, patch).await?))
}
