use std::fmt::Display;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::{FieldErrors, ModelError};
use serde::Serialize;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const MSG_NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const MSG_BAD_TOKEN: &str = "Given token not valid for any token type";

/// JSON error body: `{"error": title, "detail": msg?, "fields": {field: [msgs]}?}`
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: title.into(), detail, fields: None }
    }

    pub fn validation(fields: FieldErrors) -> Self {
        Self { fields: Some(fields), ..Self::new(StatusCode::BAD_REQUEST, "Validation Error", None) }
    }

    pub fn unauthorized(detail: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.to_string()))
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }

    /// Logged at ERROR; the cause never reaches the client.
    pub fn internal(cause: impl Display) -> Self {
        error!(error = %cause, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(fields) | ServiceError::Model(ModelError::Validation(fields)) => Self::validation(fields),
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Model(ModelError::NotFound(what)) => Self::not_found(format!("{what} not found")),
            ServiceError::Model(ModelError::Duplicate(msg)) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            other => Self::internal(other),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(fields) => Self::validation(fields),
            AuthError::Conflict => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            AuthError::NotFound => Self::not_found(e.to_string()),
            AuthError::Unauthorized => Self::unauthorized(MSG_BAD_TOKEN),
            other => {
                let code = other.code();
                error!(code, error = %other, "auth failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), "Validation Error", Some(rejection.body_text()))
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            ref r => r.status(),
        };
        Self::new(status, "Validation Error", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
