use models::errors::{FieldErrors, ModelError};
use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("vendor already exists")]
    Conflict,
    #[error("vendor not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AuthError::Validation(FieldErrors::single(field, message))
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(errs) => AuthError::Validation(errs),
            ModelError::Duplicate(_) => AuthError::Conflict,
            ModelError::NotFound(_) => AuthError::NotFound,
            ModelError::Db(msg) => AuthError::Repository(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_onto_auth_errors() {
        assert!(matches!(AuthError::from(ModelError::Duplicate("email".into())), AuthError::Conflict));
        assert!(matches!(AuthError::from(ModelError::NotFound("vendor")), AuthError::NotFound));
        assert_eq!(AuthError::from(ModelError::Db("boom".into())).code(), 1200);
    }
}
