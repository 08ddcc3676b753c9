
/// CRUD operations tests for vendors and shops
pub mod crud_tests;
