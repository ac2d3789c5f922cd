/// Session token generation and validation
///
/// After the identity provider accepts a login, the server issues its own
/// session token bound to the local `users` row. Tokens are HS256-signed JWTs
/// carried in the `folio_session` cookie (or an `Authorization: Bearer`
/// header for API clients).
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Lifetime**: 12 hours
/// - **Validation**: Signature, expiration, not-before and issuer checks
/// - **Secret Management**: Secrets must be at least 32 bytes
///
/// # Example
///
/// ```
/// use folio_shared::auth::session::{create_token, validate_token, SessionClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-very-long-secret-key-of-32-bytes-or-more";
/// let claims = SessionClaims::new(7, "admin@example.com", None);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, 7);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer stamped into every session token
pub const ISSUER: &str = "folio";

/// Default session lifetime
pub fn default_lifetime() -> Duration {
    Duration::hours(12)
}

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid session issuer")]
    InvalidIssuer,
}

/// Session token claims
///
/// # Standard Claims
///
/// - `sub`: Local user ID
/// - `iss`: Issuer (always "folio")
/// - `iat`, `nbf`, `exp`: Issue, not-before and expiry timestamps
///
/// # Custom Claims
///
/// - `email`: Email of the signed-in admin
/// - `provider_token`: Identity-provider access token, used to sign out upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_token: Option<String>,
}

impl SessionClaims {
    /// Creates claims with the default lifetime
    pub fn new(user_id: i64, email: impl Into<String>, provider_token: Option<String>) -> Self {
        Self::with_expiration(user_id, email, provider_token, default_lifetime())
    }

    /// Creates claims with a custom lifetime
    pub fn with_expiration(
        user_id: i64,
        email: impl Into<String>,
        provider_token: Option<String>,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email: email.into(),
            provider_token,
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Seconds left until expiry, used as the cookie Max-Age
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// Signs session claims into a token
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn create_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies signature, expiry, not-before and issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer,
            _ => SessionError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let claims = SessionClaims::new(42, "admin@example.com", Some("upstream".to_string()));
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, 42);
        assert_eq!(validated.email, "admin@example.com");
        assert_eq!(validated.provider_token.as_deref(), Some("upstream"));
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = SessionClaims::new(1, "admin@example.com", None);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-at-least-32-bytes");
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims =
            SessionClaims::with_expiration(1, "admin@example.com", None, Duration::seconds(-60));
        let token = create_token(&claims, SECRET).unwrap();

        assert!(claims.is_expired());
        assert_eq!(claims.remaining_seconds(), 0);
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(SessionError::Expired)
        ));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let mut claims = SessionClaims::new(1, "admin@example.com", None);
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, SECRET),
            Err(SessionError::InvalidIssuer)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_token("not.a.token", SECRET).is_err());
    }

    #[test]
    fn test_provider_token_omitted_when_absent() {
        let claims = SessionClaims::new(1, "admin@example.com", None);
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("provider_token").is_none());
    }
}
