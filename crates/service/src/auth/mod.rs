//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Vendor registration, login, token refresh and profile management live here;
//! the HTTP layer only maps requests onto [`AuthService`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::{AuthConfig, AuthService};
pub use repo::seaorm::SeaOrmAuthRepository;
