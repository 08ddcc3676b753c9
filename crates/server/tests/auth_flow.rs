mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{build_app, register, send};

#[tokio::test]
async fn test_register_returns_tokens_that_authenticate() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "POST", "/accounts/register", None, Some(json!({"email": "a@x.com", "name": "A", "password": "pw123456"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access"].is_string() && body["refresh"].is_string());
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["name"], "A");
    assert!(body["user"].get("password").is_none());

    let access = body["access"].as_str().unwrap_or_default();
    let (status, profile) = send(&app, "GET", "/accounts/profile", Some(access), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile, body["user"]);
    Ok(())
}

#[tokio::test]
async fn test_register_validation_errors() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "POST", "/accounts/register", None, Some(json!({"name": " "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["email", "name", "password"] {
        assert!(body["fields"][field].is_array(), "missing {field} in {body}");
    }

    let (status, body) = send(&app, "POST", "/accounts/register", None, Some(json!({"email": "nope", "name": "A", "password": "pw"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["email"][0], "Enter a valid email address.");
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app, "dup@x.com", "First").await?;

    let (status, body) = send(&app, "POST", "/accounts/register", None, Some(json!({"email": "dup@X.COM", "name": "Second", "password": "pw123456"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["email"][0], "vendor with this email already exists.");
    Ok(())
}

#[tokio::test]
async fn test_login_success_and_generic_failures() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app, "a@x.com", "A").await?;

    let (status, body) = send(&app, "POST", "/accounts/login", None, Some(json!({"email": "a@x.com", "password": "pw123456"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string() && body["refresh"].is_string());

    let (wrong_status, wrong_body) = send(&app, "POST", "/accounts/login", None, Some(json!({"email": "a@x.com", "password": "wrong"}))).await?;
    let (unknown_status, unknown_body) = send(&app, "POST", "/accounts/login", None, Some(json!({"email": "b@x.com", "password": "pw123456"}))).await?;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);

    let (status, body) = send(&app, "POST", "/accounts/login", None, Some(json!({"email": "a@x.com"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["password"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_refresh_flow_and_token_types() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (access, refresh, user) = register(&app, "a@x.com", "A").await?;

    let (status, body) = send(&app, "POST", "/accounts/token/refresh", None, Some(json!({"refresh": refresh}))).await?;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["access"].as_str().unwrap_or_default().to_string();
    let (status, profile) = send(&app, "GET", "/accounts/profile", Some(&fresh), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], user["id"]);

    // access token at the refresh endpoint
    let (status, _) = send(&app, "POST", "/accounts/token/refresh", None, Some(json!({"refresh": access}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // refresh token as a bearer credential
    let (status, _) = send(&app, "GET", "/accounts/profile", Some(&refresh), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_protected_routes_require_bearer() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "GET", "/accounts/profile", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, "GET", "/shops", Some("garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_profile_update_ignores_email() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (access, _, _) = register(&app, "a@x.com", "A").await?;

    let (status, body) = send(&app, "PUT", "/accounts/profile", Some(&access), Some(json!({"name": "Renamed", "email": "other@x.com"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["email"], "a@x.com");

    let (status, body) = send(&app, "PATCH", "/accounts/profile", Some(&access), Some(json!({"name": ""}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["name"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/accounts/login", None, Some(json!({"email": 42, "password": "x"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    assert!(body["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_health_and_openapi_document() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/nearby-shops"].is_object());
    Ok(())
}
