use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthVendor, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_vendor(v: models::vendor::Model) -> AuthVendor {
    AuthVendor { id: v.id, email: v.email, name: v.name }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_vendor_by_email(&self, email: &str) -> Result<Option<AuthVendor>, AuthError> {
        let res = models::vendor::find_by_email(&self.db, email).await?;
        Ok(res.map(to_vendor))
    }

    async fn find_vendor(&self, id: Uuid) -> Result<Option<AuthVendor>, AuthError> {
        let res = models::vendor::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_vendor))
    }

    async fn create_vendor_with_credentials(
        &self,
        email: &str,
        name: &str,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<AuthVendor, AuthError> {
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        // Dropping `txn` on an early return rolls both inserts back.
        let created = models::vendor::create(&txn, email, name).await?;
        models::vendor_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_vendor(created))
    }

    async fn get_credentials(&self, vendor_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::vendor_credentials::find_by_vendor(&self.db, vendor_id).await?;
        Ok(res.map(|c| Credentials { vendor_id: c.vendor_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn update_vendor_name(&self, id: Uuid, name: &str) -> Result<AuthVendor, AuthError> {
        let updated = models::vendor::update_name(&self.db, id, name).await?;
        Ok(to_vendor(updated))
    }
}
