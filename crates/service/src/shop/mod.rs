//! Shop module: vendor-scoped CRUD over shop records.
//!
//! Every lookup by id is filtered by the calling vendor as well, so another
//! vendor's shop behaves exactly like a missing one.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Shop, ShopInput, ShopPatch};
pub use repo::seaorm::SeaOrmShopRepository;
pub use service::ShopService;
