/// External identity provider client
///
/// Admin credentials are verified by a hosted auth service (Supabase Auth
/// compatible GoTrue REST API). The server never stores passwords; it only
/// learns who the provider says the user is.
///
/// The `IdentityProvider` trait is the seam used by the HTTP handlers, so
/// tests can substitute an in-memory implementation.
///
/// # Example
///
/// ```no_run
/// use folio_shared::auth::identity::{IdentityProvider, SupabaseAuth};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = SupabaseAuth::new(reqwest::Client::new(), "https://project.supabase.co", "anon-key");
/// let user = auth.sign_in_with_password("admin@example.com", "admin123").await?;
/// println!("Signed in as {}", user.email);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Error type for identity provider calls
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider refused the request (bad credentials, duplicate user, ...)
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached
    #[error("Identity provider unreachable: {0}")]
    Transport(String),

    /// The provider answered with something we could not understand
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}

/// A user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Provider subject id
    pub id: String,

    /// Email the provider has on record
    pub email: String,

    /// Provider access token, present after a password sign-in
    pub access_token: Option<String>,
}

/// Credential verification and session issuance delegated to an external service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies an email/password pair
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError>;

    /// Registers a new account
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError>;

    /// Revokes the provider session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}

/// GoTrue (Supabase Auth) REST client
#[derive(Debug, Clone)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

/// Signup answers with either a session (`{access_token, user}`) or a bare user
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session {
        access_token: String,
        user: ProviderUser,
    },
    User(ProviderUser),
}

/// Error payloads differ across GoTrue versions
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl SupabaseAuth {
    /// Client for the project at `base_url`, sharing `http`'s connection pool
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn rejection(response: reqwest::Response) -> IdentityError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        classify_failure(status, &body)
    }
}

/// A 5xx means the provider is down, not that it refused the credentials
fn classify_failure(status: StatusCode, body: &str) -> IdentityError {
    let message = serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(ProviderErrorBody::into_message)
        .unwrap_or_else(|| format!("request failed with status {}", status));

    if status.is_server_error() {
        IdentityError::Transport(message)
    } else {
        IdentityError::Rejected(message)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError> {
        debug!(email, "Signing in with identity provider");

        let response = self
            .http
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        Ok(IdentityUser {
            id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: Some(token.access_token),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError> {
        debug!(email, "Registering account with identity provider");

        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        let (user, access_token) = match body {
            SignUpResponse::Session { access_token, user } => (user, Some(access_token)),
            SignUpResponse::User(user) => (user, None),
        };

        Ok(IdentityUser {
            id: user.id,
            email: user.email.unwrap_or_else(|| email.to_string()),
            access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outage_is_transport_failure() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert!(matches!(err, IdentityError::Transport(ref m) if m.contains("502")));

        let err = classify_failure(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"message":"Service temporarily unavailable"}"#,
        );
        assert!(matches!(
            err,
            IdentityError::Transport(ref m) if m == "Service temporarily unavailable"
        ));
    }

    #[test]
    fn test_client_error_is_rejection() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert!(matches!(err, IdentityError::Rejected(ref m) if m == "Invalid login credentials"));

        let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, "");
        assert!(matches!(err, IdentityError::Rejected(ref m) if m.contains("422")));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let auth = SupabaseAuth::new(reqwest::Client::new(), "https://project.supabase.co/", "key");
        assert_eq!(
            auth.endpoint("signup"),
            "https://project.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_error_body_prefers_description() {
        let body: ProviderErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("Invalid login credentials")
        );
    }

    #[test]
    fn test_error_body_newer_shape() {
        let body: ProviderErrorBody = serde_json::from_str(
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User already registered"));
    }

    #[test]
    fn test_signup_response_shapes() {
        let session: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"tok","user":{"id":"u1","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert!(matches!(session, SignUpResponse::Session { .. }));

        let user: SignUpResponse =
            serde_json::from_str(r#"{"id":"u2","email":"a@b.c","aud":"authenticated"}"#).unwrap();
        assert!(matches!(user, SignUpResponse::User(_)));
    }
}
