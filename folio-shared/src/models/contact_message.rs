/// Contact message model and database operations
///
/// Messages arrive through the public contact endpoint and are read in the
/// admin inbox. The only mutation after creation is flipping `read` to true.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contact_messages (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT,
///     email TEXT,
///     subject TEXT,
///     message TEXT,
///     timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     read BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use folio_shared::models::contact_message::ContactMessage;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if ContactMessage::mark_read(&pool, 42).await?.is_some() {
///     let unread = ContactMessage::count_unread(&pool).await?;
///     println!("{} unread messages left", unread);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

const COLUMNS: &str = "id, name, email, subject, message, timestamp, read";

/// An inbox entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,

    /// When the message was received
    pub timestamp: DateTime<Utc>,

    /// Whether the admin has opened the message
    pub read: bool,
}

/// Input for storing a submitted message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactMessage {
    /// Stores a new unread message
    pub async fn create(pool: &PgPool, data: CreateContactMessage) -> Result<Self, sqlx::Error> {
        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.email)
        .bind(data.subject)
        .bind(data.message)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {COLUMNS} FROM contact_messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(message)
    }

    /// Lists every message, newest first
    pub async fn list_newest_first(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {COLUMNS} FROM contact_messages ORDER BY timestamp DESC, id DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// Marks a message as read
    ///
    /// # Returns
    ///
    /// - `None` if the message doesn't exist
    /// - `Some(true)` if the message flipped from unread to read
    /// - `Some(false)` if it was already read (nothing written)
    pub async fn mark_read(pool: &PgPool, id: i64) -> Result<Option<bool>, sqlx::Error> {
        let changed = sqlx::query(
            "UPDATE contact_messages SET read = TRUE WHERE id = $1 AND read = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected()
            > 0;

        if changed {
            return Ok(Some(true));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM contact_messages WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists.then_some(false))
    }

    /// Counts messages not yet read
    pub async fn count_unread(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contact_messages WHERE read = FALSE")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
