/// User model and database operations
///
/// Credentials live with the external identity provider. This table only maps
/// a provider account onto a local id so sessions can be scoped to a row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email CITEXT NOT NULL UNIQUE,
///     provider_user_id VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use folio_shared::models::user::User;
/// use folio_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Sync the local record after the provider accepted the credentials
/// let user = User::find_or_create(&pool, "admin@example.com", Some("provider-id")).await?;
/// User::update_last_login(&pool, user.id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

const COLUMNS: &str = "id, email::TEXT AS email, provider_user_id, created_at, last_login_at";

/// Local shadow of an identity-provider account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    /// Compared case-insensitively
    pub email: String,

    /// Subject id assigned by the identity provider
    pub provider_user_id: Option<String>,

    pub created_at: DateTime<Utc>,

    /// `None` until the first successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE email = $1::citext"))
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Returns the local record for `email`, creating it if missing
    ///
    /// A concurrent insert of the same email is absorbed by `ON CONFLICT`, so
    /// two simultaneous first logins both end up with the same row. The
    /// provider id is filled in when the existing row has none.
    pub async fn find_or_create(
        pool: &PgPool,
        email: &str,
        provider_user_id: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, provider_user_id)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE
                SET provider_user_id = COALESCE(users.provider_user_id, EXCLUDED.provider_user_id)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(email)
        .bind(provider_user_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Stamps `last_login_at`; false when the row is gone
    pub async fn update_last_login(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map(|done| done.rows_affected() == 1)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
