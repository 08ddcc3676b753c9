//! SeaORM entities and row-level helpers for vendors, their credentials
//! and their shops.

pub mod errors;
pub mod db;
pub mod vendor;
pub mod vendor_credentials;
pub mod shop;

#[cfg(test)]
mod tests;
