#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, auth::ServerState};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

/// Router over a fresh in-memory database.
pub async fn build_app() -> anyhow::Result<Router> {
    let db = models::db::connect_ephemeral().await?;
    let auth = configs::AuthConfig {
        jwt_secret: "test-secret".into(),
        access_ttl_secs: 300,
        refresh_ttl_secs: 3600,
    };
    let state = ServerState::new(db, &auth, &configs::NearbyConfig::default());
    Ok(routes::build_router(state, cors()))
}

/// Send one request; the body is parsed as JSON (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

/// Registered vendor: `(access, refresh, user)`.
pub async fn register(app: &Router, email: &str, name: &str) -> anyhow::Result<(String, String, Value)> {
    let (status, body) = send(app, "POST", "/accounts/register", None, Some(json!({"email": email, "name": name, "password": "pw123456"}))).await?;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let access = body["access"].as_str().unwrap_or_default().to_string();
    let refresh = body["refresh"].as_str().unwrap_or_default().to_string();
    Ok((access, refresh, body["user"].clone()))
}

pub fn shop_body(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({"name": name, "owner": "Owner", "business_type": "Retail", "latitude": latitude, "longitude": longitude})
}
