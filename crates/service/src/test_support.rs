#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh migrated in-memory database for the calling test.
///
/// Each call gets its own SQLite memory database, so tests never see each
/// other's rows and can run in parallel.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_ephemeral().await
}
