/// Research / thesis model and database operations
///
/// `link` points either at an external publication page or at an uploaded PDF.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE research (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     link TEXT,
///     publication_date TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, title, description, link, publication_date, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Research {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub publication_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResearch {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub publication_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResearch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub publication_date: Option<String>,
}

impl Research {
    pub async fn create(pool: &PgPool, data: CreateResearch) -> Result<Self, sqlx::Error> {
        let research = sqlx::query_as::<_, Research>(&format!(
            r#"
            INSERT INTO research (title, description, link, publication_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.link)
        .bind(data.publication_date)
        .fetch_one(pool)
        .await?;

        Ok(research)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let research =
            sqlx::query_as::<_, Research>(&format!("SELECT {COLUMNS} FROM research WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(research)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let entries =
            sqlx::query_as::<_, Research>(&format!("SELECT {COLUMNS} FROM research ORDER BY id"))
                .fetch_all(pool)
                .await?;

        Ok(entries)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateResearch,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE research SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(link) = data.link {
            query.push(", link = ").push_bind(link);
        }
        if let Some(publication_date) = data.publication_date {
            query.push(", publication_date = ").push_bind(publication_date);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let research = query.build_query_as::<Research>().fetch_optional(pool).await?;

        Ok(research)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM research WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
