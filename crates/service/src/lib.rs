//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Repositories are traits so services can run against SeaORM or in-memory mocks.

pub mod errors;
pub mod auth;
pub mod shop;
pub mod nearby;
#[cfg(test)]
pub mod test_support;
