/// Session authentication primitives for Axum
///
/// This module turns a request's session cookie (or `Authorization: Bearer`
/// header) into an [`AuthContext`] and provides the `Set-Cookie` builders
/// used by the login, logout and flash-message flows.
///
/// # Request Extensions
///
/// After successful authentication the API's session layer adds:
/// - `AuthContext`: local user id, email and the upstream provider token
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use folio_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Signed in as {}", auth.email)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::session::{validate_token, SessionClaims, SessionError};
use crate::models::user::User;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "folio_session";

/// Cookie carrying a one-shot flash message across a redirect
pub const FLASH_COOKIE: &str = "folio_flash";

/// Authentication context added to request extensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Local user ID
    pub user_id: i64,

    /// Email of the signed-in admin
    pub email: String,

    /// Identity-provider access token, if the provider issued one
    pub provider_token: Option<String>,
}

impl AuthContext {
    /// Context for validated session claims, before the user row is checked
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            provider_token: claims.provider_token,
        }
    }
}

/// Error type for session authentication
#[derive(Debug)]
pub enum AuthError {
    /// No session cookie or bearer token
    MissingCredentials,

    /// Authorization header present but malformed
    InvalidFormat(String),

    /// Token failed validation or expired
    InvalidSession(String),

    /// Token is valid but its user row no longer exists
    UnknownUser,

    /// Database error
    DatabaseError(String),
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AuthError::InvalidSession("Session expired".to_string()),
            SessionError::InvalidIssuer => {
                AuthError::InvalidSession("Invalid session issuer".to_string())
            }
            other => AuthError::InvalidSession(other.to_string()),
        }
    }
}

/// Returns the value of cookie `name` from the request's `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// Extracts the session token
///
/// A bearer token wins over the cookie so API clients can authenticate
/// without a browser cookie jar.
pub fn session_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let value = auth_header
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Invalid authorization header".to_string()))?;

        return value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()));
    }

    read_cookie(headers, SESSION_COOKIE)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredentials)
}

/// Validates the request's session and loads its user row
///
/// # Errors
///
/// - `MissingCredentials` / `InvalidFormat` when no usable token is present
/// - `InvalidSession` when the token is forged or expired
/// - `UnknownUser` when the user row has been deleted since sign-in
pub async fn authenticate(
    pool: &PgPool,
    secret: &str,
    headers: &HeaderMap,
) -> Result<AuthContext, AuthError> {
    let token = session_token(headers)?;
    let claims = validate_token(token, secret)?;

    let user = User::find_by_id(pool, claims.sub)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Database error: {}", e)))?
        .ok_or(AuthError::UnknownUser)?;

    // The row's email wins over the one signed into the token
    Ok(AuthContext {
        email: user.email,
        ..AuthContext::from_claims(claims)
    })
}

fn cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value storing a session token
pub fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    cookie(SESSION_COOKIE, token, max_age, secure)
}

/// `Set-Cookie` value deleting cookie `name`
pub fn expired_cookie(name: &str, secure: bool) -> String {
    cookie(name, "", 0, secure)
}

/// `Set-Cookie` value carrying a flash message
///
/// The message is hex-encoded so any text survives cookie syntax.
pub fn flash_cookie(message: &str, secure: bool) -> String {
    cookie(FLASH_COOKIE, &hex::encode(message.as_bytes()), 60, secure)
}

/// Decodes the pending flash message, if any
pub fn read_flash(headers: &HeaderMap) -> Option<String> {
    let encoded = read_cookie(headers, FLASH_COOKIE)?;
    let bytes = hex::decode(encoded).ok()?;
    String::from_utf8(bytes).ok().filter(|m| !m.is_empty())
}
