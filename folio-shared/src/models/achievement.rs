/// Achievement model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE achievements (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     date TEXT NOT NULL,
///     link TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, title, description, date, link, created_at, updated_at";

/// An award, certification or similar milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// Display date, stored as entered
    pub date: String,

    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAchievement {
    pub title: String,
    pub description: String,
    pub date: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAchievement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

impl Achievement {
    pub async fn create(pool: &PgPool, data: CreateAchievement) -> Result<Self, sqlx::Error> {
        let achievement = sqlx::query_as::<_, Achievement>(&format!(
            r#"
            INSERT INTO achievements (title, description, date, link)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.date)
        .bind(data.link)
        .fetch_one(pool)
        .await?;

        Ok(achievement)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let achievement = sqlx::query_as::<_, Achievement>(&format!(
            "SELECT {COLUMNS} FROM achievements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(achievement)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let achievements = sqlx::query_as::<_, Achievement>(&format!(
            "SELECT {COLUMNS} FROM achievements ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(achievements)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateAchievement,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE achievements SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(date) = data.date {
            query.push(", date = ").push_bind(date);
        }
        if let Some(link) = data.link {
            query.push(", link = ").push_bind(link);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let achievement = query
            .build_query_as::<Achievement>()
            .fetch_optional(pool)
            .await?;

        Ok(achievement)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM achievements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
