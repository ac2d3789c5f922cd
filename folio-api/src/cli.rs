/// Command-line interface
///
/// ```text
/// folio-api                 # same as `serve`
/// folio-api serve
/// folio-api create-admin --email me@example.com --password s3cret
/// ```

use clap::{Parser, Subcommand};
use folio_shared::{
    auth::identity::{IdentityError, IdentityProvider},
    models::{about::About, user::User},
};
use sqlx::PgPool;
use tracing::{info, warn};

/// Name the profile is seeded with
pub const DEFAULT_ABOUT_NAME: &str = "Your Name";

#[derive(Debug, Parser)]
#[command(name = "folio-api")]
#[command(version, about = "Portfolio content API server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Register the admin account and seed an empty profile
    CreateAdmin {
        #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@example.com")]
        email: String,

        #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin123")]
        password: String,
    },
}

impl Cli {
    /// Subcommand to run; `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

/// Registers the admin with the identity provider and prepares local rows
///
/// A rejection from the provider (typically "User already registered") is
/// logged and ignored so the command can be re-run safely. The local user
/// row and the profile singleton are created only if missing.
pub async fn create_admin(
    pool: &PgPool,
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    let provider_user_id = match identity.sign_up(email, password).await {
        Ok(registered) => {
            info!(
                email,
                provider_user_id = %registered.id,
                "Admin registered with identity provider"
            );
            Some(registered.id)
        }
        Err(IdentityError::Rejected(reason)) => {
            warn!(email, reason = %reason, "Identity provider refused registration, continuing");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let user = User::find_or_create(pool, email, provider_user_id.as_deref()).await?;
    let about = About::ensure_exists(pool, DEFAULT_ABOUT_NAME).await?;

    info!(user_id = user.id, about_id = about.id, "Admin account ready");

    Ok(user)
}
