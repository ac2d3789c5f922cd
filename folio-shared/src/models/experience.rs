/// Work experience model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE experience (
///     id BIGSERIAL PRIMARY KEY,
///     role TEXT NOT NULL,
///     company TEXT NOT NULL,
///     year_range TEXT NOT NULL,
///     description TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, role, company, year_range, description, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: i64,
    pub role: String,
    pub company: String,
    pub year_range: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExperience {
    pub role: String,
    pub company: String,
    pub year_range: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExperience {
    pub role: Option<String>,
    pub company: Option<String>,
    pub year_range: Option<String>,
    pub description: Option<String>,
}

impl Experience {
    pub async fn create(pool: &PgPool, data: CreateExperience) -> Result<Self, sqlx::Error> {
        let experience = sqlx::query_as::<_, Experience>(&format!(
            r#"
            INSERT INTO experience (role, company, year_range, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.role)
        .bind(data.company)
        .bind(data.year_range)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(experience)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let experience = sqlx::query_as::<_, Experience>(&format!(
            "SELECT {COLUMNS} FROM experience WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(experience)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let entries = sqlx::query_as::<_, Experience>(&format!(
            "SELECT {COLUMNS} FROM experience ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Writes only the provided fields; None if the row doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateExperience,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE experience SET updated_at = NOW()");

        if let Some(role) = data.role {
            query.push(", role = ").push_bind(role);
        }
        if let Some(company) = data.company {
            query.push(", company = ").push_bind(company);
        }
        if let Some(year_range) = data.year_range {
            query.push(", year_range = ").push_bind(year_range);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let experience = query
            .build_query_as::<Experience>()
            .fetch_optional(pool)
            .await?;

        Ok(experience)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM experience WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
