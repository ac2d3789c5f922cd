/// Authentication utilities
///
/// Credentials are verified by an external identity provider; the server then
/// keeps its own signed session bound to a local `users` row.
///
/// # Modules
///
/// - [`identity`]: Identity provider trait and the GoTrue REST client
/// - [`session`]: Session token (JWT) issuance and validation
/// - [`middleware`]: Auth context, session extraction and cookie builders
///
/// # Example
///
/// ```no_run
/// use folio_shared::auth::identity::{IdentityProvider, SupabaseAuth};
/// use folio_shared::auth::session::{create_token, SessionClaims};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http = reqwest::Client::new();
/// let provider = SupabaseAuth::new(http, "https://project.supabase.co", "anon-key");
/// let identity = provider.sign_in_with_password("admin@example.com", "admin123").await?;
///
/// let claims = SessionClaims::new(1, identity.email, identity.access_token);
/// let token = create_token(&claims, "a-very-long-secret-key-of-32-bytes-or-more")?;
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod middleware;
pub mod session;
