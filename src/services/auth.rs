use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during admin authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    HashError(String),

    #[error("Token encoding failed: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims for admin sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin account id
    pub sub: String,
    /// Admin email
    pub email: String,
    /// Expiry as unix timestamp
    pub exp: u64,
    /// Issued-at as unix timestamp
    pub iat: u64,
}

/// Admin token issuer and password verifier
///
/// Password hashes in the admins table are bcrypt, written with cost 10
/// to stay compatible with accounts created by the original admin panel.
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    token_ttl_secs: u64,
}

const BCRYPT_COST: u32 = 10;

impl AuthService {
    pub fn new(secret: String, token_ttl_secs: u64) -> Self {
        Self {
            secret,
            token_ttl_secs,
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Hash a password for a new admin account
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::HashError(e.to_string()))
    }

    /// Verify a password against a stored bcrypt hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(|e| AuthError::HashError(e.to_string()))
    }

    /// Issue a signed session token for an admin
    pub fn issue_token(&self, admin_id: &str, email: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = AdminClaims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            exp: now + self.token_ttl_secs,
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Validate a session token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<AdminClaims, AuthError> {
        decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> AuthService {
        AuthService::new("test-secret".to_string(), 3600)
    }

    #[test]
    fn test_password_hash_and_verify() {
        let auth = test_service();
        let hash = auth.hash_password("hunter2000").unwrap();

        assert!(auth.verify_password("hunter2000", &hash).unwrap());
        assert!(!auth.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_token_round_trip() {
        let auth = test_service();
        let token = auth.issue_token("a1", "admin@dealer.test").unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "a1");
        assert_eq!(claims.email, "admin@dealer.test");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let auth = test_service();
        let token = auth.issue_token("a1", "admin@dealer.test").unwrap();

        let other = AuthService::new("other-secret".to_string(), 3600);
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = test_service();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
