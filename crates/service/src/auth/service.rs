use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::errors::{FieldErrors, MSG_BLANK, MSG_REQUIRED};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use tracing::{info, debug, warn, instrument};
use uuid::Uuid;

use super::domain::{AccessToken, AuthVendor, LoginInput, RefreshInput, Registration, RegisterInput, TokenPair, VendorPatch};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::{TokenIssuer, TokenType};

pub const MSG_EMAIL_TAKEN: &str = "vendor with this email already exists.";
pub const PASSWORD_ALGORITHM: &str = "argon2";

/// Hash of a throwaway password. Logins for unknown emails verify against it
/// so every failed login pays for one argon2 run.
static DUMMY_HASH: Lazy<Result<String, String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"no-such-vendor", &salt)
        .map(|h| h.to_string())
        .map_err(|e| e.to_string())
});

fn password_matches(password: &str, phc: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
    pub password_algorithm: String,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self {
            jwt_secret: c.jwt_secret.clone(),
            access_ttl_secs: c.access_ttl_secs,
            refresh_ttl_secs: c.refresh_ttl_secs,
            password_algorithm: PASSWORD_ALGORITHM.into(),
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: TokenIssuer,
    cfg: AuthConfig,
}

/// Present and non-blank; the raw value is returned untrimmed.
fn required_secret(errs: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value {
        None => {
            errs.add(field, MSG_REQUIRED);
            None
        }
        Some(v) if v.trim().is_empty() => {
            errs.add(field, MSG_BLANK);
            None
        }
        Some(v) => Some(v.to_string()),
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&cfg.jwt_secret, cfg.access_ttl_secs, cfg.refresh_ttl_secs);
        Lazy::force(&DUMMY_HASH);
        Self { repo, tokens, cfg }
    }

    /// Register a new vendor with a hashed password and issue a token pair.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), access_ttl_secs: 60, refresh_ttl_secs: 600, password_algorithm: "argon2".into() };
    /// let svc = AuthService::new(repo, cfg);
    /// let input = RegisterInput { email: Some("user@example.com".into()), name: Some("Test".into()), password: Some("pw123456".into()) };
    /// let reg = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(reg.user.email, "user@example.com");
    /// assert!(!reg.tokens.access.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<Registration, AuthError> {
        let (identity, mut errs) = match models::vendor::validate_new(input.email.as_deref(), input.name.as_deref()) {
            Ok(pair) => (Some(pair), FieldErrors::default()),
            Err(e) => (None, e),
        };
        let password = required_secret(&mut errs, "password", input.password.as_deref());
        let (Some((email, name)), Some(password)) = (identity, password) else {
            return Err(AuthError::Validation(errs));
        };

        if self.repo.find_vendor_by_email(&email).await?.is_some() {
            debug!(event = "register_conflict");
            return Err(AuthError::field("email", MSG_EMAIL_TAKEN));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let vendor = match self.repo.create_vendor_with_credentials(&email, &name, hash, self.cfg.password_algorithm.clone()).await {
            Ok(v) => v,
            // Lost a race against a concurrent registration; the unique index decided.
            Err(AuthError::Conflict) => return Err(AuthError::field("email", MSG_EMAIL_TAKEN)),
            Err(e) => return Err(e),
        };
        let tokens = self.tokens.issue_pair(vendor.id)?;
        info!(vendor_id = %vendor.id, email = %vendor.email, "vendor_registered");
        Ok(Registration { tokens, user: vendor })
    }

    /// Authenticate a vendor and issue a fresh token pair.
    ///
    /// Unknown email and wrong password produce the same [`AuthError::Unauthorized`].
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), access_ttl_secs: 60, refresh_ttl_secs: 600, password_algorithm: "argon2".into() };
    /// let svc = AuthService::new(repo.clone(), cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: Some("u@e.com".into()), name: Some("N".into()), password: Some("Passw0rd".into()) }));
    /// let pair = tokio_test::block_on(svc.login(LoginInput { email: Some("u@e.com".into()), password: Some("Passw0rd".into()) })).unwrap();
    /// assert!(!pair.refresh.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenPair, AuthError> {
        let mut errs = FieldErrors::default();
        let email = required_secret(&mut errs, "email", input.email.as_deref());
        let password = required_secret(&mut errs, "password", input.password.as_deref());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Validation(errs));
        };
        // A malformed address cannot match a stored one; fall through to the generic failure.
        let email = models::vendor::normalize_email(&email).unwrap_or_else(|_| email.trim().to_string());

        let vendor = self.repo.find_vendor_by_email(&email).await?;
        let cred = match &vendor {
            Some(v) => self.repo.get_credentials(v.id).await?,
            None => None,
        };
        let (Some(vendor), Some(cred)) = (vendor, cred) else {
            let dummy = DUMMY_HASH.as_ref().map_err(|e| AuthError::HashError(e.clone()))?;
            password_matches(&password, dummy)?;
            warn!(event = "login_failed", reason = "unknown_email");
            return Err(AuthError::Unauthorized);
        };

        if !password_matches(&password, &cred.password_hash)? {
            warn!(event = "login_failed", reason = "bad_password", vendor_id = %vendor.id);
            return Err(AuthError::Unauthorized);
        }

        let pair = self.tokens.issue_pair(vendor.id)?;
        info!(vendor_id = %vendor.id, "vendor_logged_in");
        Ok(pair)
    }

    /// Exchange a refresh token for a new access token.
    #[instrument(skip(self, input))]
    pub async fn refresh(&self, input: RefreshInput) -> Result<AccessToken, AuthError> {
        let mut errs = FieldErrors::default();
        let Some(token) = required_secret(&mut errs, "refresh", input.refresh.as_deref()) else {
            return Err(AuthError::Validation(errs));
        };
        let claims = self.tokens.verify(&token, TokenType::Refresh)?;
        let vendor = self.repo.find_vendor(claims.vendor_id()?).await?.ok_or(AuthError::Unauthorized)?;
        let access = self.tokens.issue(vendor.id, TokenType::Access)?;
        debug!(vendor_id = %vendor.id, "access_token_refreshed");
        Ok(AccessToken { access })
    }

    /// Resolve a bearer access token into the vendor it was issued to.
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthVendor, AuthError> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;
        self.repo.find_vendor(claims.vendor_id()?).await?.ok_or(AuthError::Unauthorized)
    }

    pub async fn profile(&self, vendor_id: Uuid) -> Result<AuthVendor, AuthError> {
        self.repo.find_vendor(vendor_id).await?.ok_or(AuthError::NotFound)
    }

    /// Apply a partial profile update. Without a `name` the current profile is returned.
    #[instrument(skip(self, patch), fields(vendor_id = %vendor_id))]
    pub async fn update_profile(&self, vendor_id: Uuid, patch: VendorPatch) -> Result<AuthVendor, AuthError> {
        let Some(name) = patch.name else {
            return self.profile(vendor_id).await;
        };
        let name = models::vendor::validate_name(&name).map_err(|m| AuthError::field("name", m))?;
        let updated = self.repo.update_vendor_name(vendor_id, &name).await?;
        info!(vendor_id = %updated.id, "vendor_profile_updated");
        Ok(updated)
    }
}
