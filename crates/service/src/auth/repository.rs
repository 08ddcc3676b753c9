use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthVendor, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_vendor_by_email(&self, email: &str) -> Result<Option<AuthVendor>, AuthError>;
    async fn find_vendor(&self, id: Uuid) -> Result<Option<AuthVendor>, AuthError>;

    /// Persist the vendor and its credential row atomically.
    /// Returns [`AuthError::Conflict`] when the email is taken.
    async fn create_vendor_with_credentials(
        &self,
        email: &str,
        name: &str,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<AuthVendor, AuthError>;

    async fn get_credentials(&self, vendor_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn update_vendor_name(&self, id: Uuid, name: &str) -> Result<AuthVendor, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAuthRepository {
        vendors: Mutex<HashMap<Uuid, AuthVendor>>,
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: vendor_id
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, AuthError> {
        m.lock().map_err(|_| AuthError::Repository("mock repository lock poisoned".into()))
    }

    impl MockAuthRepository {
        pub fn vendor_count(&self) -> usize {
            self.vendors.lock().map(|v| v.len()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_vendor_by_email(&self, email: &str) -> Result<Option<AuthVendor>, AuthError> {
            let vendors = lock(&self.vendors)?;
            Ok(vendors.values().find(|v| v.email == email).cloned())
        }

        async fn find_vendor(&self, id: Uuid) -> Result<Option<AuthVendor>, AuthError> {
            Ok(lock(&self.vendors)?.get(&id).cloned())
        }

        async fn create_vendor_with_credentials(
            &self,
            email: &str,
            name: &str,
            password_hash: String,
            password_algorithm: String,
        ) -> Result<AuthVendor, AuthError> {
            let mut vendors = lock(&self.vendors)?;
            if vendors.values().any(|v| v.email == email) {
                return Err(AuthError::Conflict);
            }
            let vendor = AuthVendor { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string() };
            let c = Credentials { vendor_id: vendor.id, password_hash, password_algorithm };
            lock(&self.creds)?.insert(vendor.id, c);
            vendors.insert(vendor.id, vendor.clone());
            Ok(vendor)
        }

        async fn get_credentials(&self, vendor_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            Ok(lock(&self.creds)?.get(&vendor_id).cloned())
        }

        async fn update_vendor_name(&self, id: Uuid, name: &str) -> Result<AuthVendor, AuthError> {
            let mut vendors = lock(&self.vendors)?;
            let vendor = vendors.get_mut(&id).ok_or(AuthError::NotFound)?;
            vendor.name = name.to_string();
            Ok(vendor.clone())
        }
    }
}
