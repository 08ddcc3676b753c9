use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::domain::TokenPair;
use super::errors::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims. `sub` is the vendor id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn vendor_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::Unauthorized)
    }
}

/// Signs and verifies HS256 access/refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs: i64::try_from(access_ttl_secs).unwrap_or(i64::MAX),
            refresh_ttl_secs: i64::try_from(refresh_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn issue_pair(&self, vendor_id: Uuid) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(vendor_id, TokenType::Access)?,
            refresh: self.issue(vendor_id, TokenType::Refresh)?,
        })
    }

    pub fn issue(&self, vendor_id: Uuid, token_type: TokenType) -> Result<String, AuthError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };
        self.sign(vendor_id, token_type, ttl)
    }

    fn sign(&self, vendor_id: Uuid, token_type: TokenType, ttl_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = TimeDelta::try_seconds(ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenError(format!("token lifetime of {ttl_secs}s is out of range")))?;
        let claims = Claims {
            sub: vendor_id.to_string(),
            token_type,
            jti: Uuid::new_v4().simple().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode `token` and check signature, expiry and token type.
    ///
    /// Every failure collapses into [`AuthError::Unauthorized`]; the reason is
    /// only logged at DEBUG.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)).map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })?;
        if data.claims.token_type != expected {
            debug!(got = ?data.claims.token_type, want = ?expected, "token type mismatch");
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 60, 600)
    }

    #[test]
    fn access_token_round_trips_vendor_id() -> Result<(), AuthError> {
        let id = Uuid::new_v4();
        let token = issuer().issue(id, TokenType::Access)?;
        let claims = issuer().verify(&token, TokenType::Access)?;
        assert_eq!(claims.vendor_id()?, id);
        assert!(claims.exp > claims.iat);
        Ok(())
    }

    #[test]
    fn token_type_is_enforced() -> Result<(), AuthError> {
        let pair = issuer().issue_pair(Uuid::new_v4())?;
        assert!(matches!(issuer().verify(&pair.refresh, TokenType::Access), Err(AuthError::Unauthorized)));
        assert!(matches!(issuer().verify(&pair.access, TokenType::Refresh), Err(AuthError::Unauthorized)));
        assert!(issuer().verify(&pair.refresh, TokenType::Refresh).is_ok());
        Ok(())
    }

    #[test]
    fn pair_tokens_have_distinct_ids() -> Result<(), AuthError> {
        let pair = issuer().issue_pair(Uuid::new_v4())?;
        let a = issuer().verify(&pair.access, TokenType::Access)?;
        let r = issuer().verify(&pair.refresh, TokenType::Refresh)?;
        assert_ne!(a.jti, r.jti);
        assert!(r.exp > a.exp);
        Ok(())
    }

    #[test]
    fn rejects_expired_foreign_and_garbage_tokens() -> Result<(), AuthError> {
        let id = Uuid::new_v4();
        // Past the default 60s leeway.
        let expired = issuer().sign(id, TokenType::Access, -300)?;
        assert!(matches!(issuer().verify(&expired, TokenType::Access), Err(AuthError::Unauthorized)));

        let foreign = TokenIssuer::new("other-secret", 60, 600).issue(id, TokenType::Access)?;
        assert!(matches!(issuer().verify(&foreign, TokenType::Access), Err(AuthError::Unauthorized)));

        assert!(matches!(issuer().verify("not.a.jwt", TokenType::Access), Err(AuthError::Unauthorized)));
        Ok(())
    }

    #[test]
    fn out_of_range_lifetimes_fail_without_panicking() {
        let id = Uuid::new_v4();
        let huge = TokenIssuer::new("s", 60, 1_000_000_000_000_000);
        assert!(huge.issue(id, TokenType::Access).is_ok());
        assert!(matches!(huge.issue(id, TokenType::Refresh), Err(AuthError::TokenError(_))));

        let beyond_delta = TokenIssuer::new("s", 60, 10_000_000_000_000_000);
        assert!(matches!(beyond_delta.issue_pair(id), Err(AuthError::TokenError(_))));

        let wraps_negative = TokenIssuer::new("s", u64::MAX, u64::MAX);
        assert!(matches!(wraps_negative.issue(id, TokenType::Access), Err(AuthError::TokenError(_))));
    }
}
