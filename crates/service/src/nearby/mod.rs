//! Public nearby-shop search.
//!
//! A full scan of every shop, filtered and ranked by haversine distance from
//! the query point. No spatial index is involved.

pub mod query;
pub mod service;

pub use query::{NearbyQuery, MSG_INVALID_NUMBER};
pub use service::{rank_nearby, NearbyService, NearbyShop};
