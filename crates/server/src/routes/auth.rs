use std::sync::Arc;

use axum::{extract::{Request, State}, http::header::AUTHORIZATION, middleware::Next, response::Response};
use sea_orm::DatabaseConnection;
use service::auth::{errors::AuthError, AuthConfig, AuthService, SeaOrmAuthRepository};
use service::nearby::NearbyService;
use service::shop::{SeaOrmShopRepository, ShopService};

use crate::errors::{JsonApiError, MSG_BAD_TOKEN, MSG_NOT_AUTHENTICATED};

/// Shared handler state. Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub shops: Arc<ShopService<SeaOrmShopRepository>>,
    pub nearby: Arc<NearbyService<SeaOrmShopRepository>>,
    pub default_radius_km: f64,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: &configs::AuthConfig, nearby: &configs::NearbyConfig) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let shop_repo = Arc::new(SeaOrmShopRepository::new(db));
        Self {
            auth: Arc::new(AuthService::new(auth_repo, AuthConfig::from(auth))),
            shops: Arc::new(ShopService::new(shop_repo.clone())),
            nearby: Arc::new(NearbyService::new(shop_repo)),
            default_radius_km: nearby.default_radius_km,
        }
    }
}

/// 路由级中间件：校验 Authorization: Bearer <access token>
/// 通过后将 AuthVendor 注入 request 扩展；缺失或非法均返回 401
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let token = match req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => {
            tracing::warn!(path = %path, "missing Authorization header");
            return Err(JsonApiError::unauthorized(MSG_NOT_AUTHENTICATED));
        }
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized(MSG_BAD_TOKEN));
            }
        },
    };

    match state.auth.authenticate(&token).await {
        Ok(vendor) => {
            req.extensions_mut().insert(vendor);
            Ok(next.run(req).await)
        }
        Err(AuthError::Unauthorized) => {
            tracing::warn!(path = %path, "token validation failed");
            Err(JsonApiError::unauthorized(MSG_BAD_TOKEN))
        }
        Err(e) => Err(e.into()),
    }
}
