/// Education model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE education (
///     id BIGSERIAL PRIMARY KEY,
///     degree TEXT NOT NULL,
///     institution TEXT NOT NULL,
///     logo_url TEXT,
///     year_range TEXT NOT NULL,
///     description TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str =
    "id, degree, institution, logo_url, year_range, description, created_at, updated_at";

/// A degree or course of study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Education {
    pub id: i64,
    pub degree: String,
    pub institution: String,

    /// Institution logo, usually an uploaded image
    pub logo_url: Option<String>,

    /// Free-form period, e.g. "2018 - 2022"
    pub year_range: String,

    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an education entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEducation {
    pub degree: String,
    pub institution: String,
    pub logo_url: Option<String>,
    pub year_range: String,
    pub description: String,
}

/// Input for updating an education entry; only non-None fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEducation {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub logo_url: Option<String>,
    pub year_range: Option<String>,
    pub description: Option<String>,
}

impl Education {
    pub async fn create(pool: &PgPool, data: CreateEducation) -> Result<Self, sqlx::Error> {
        let education = sqlx::query_as::<_, Education>(&format!(
            r#"
            INSERT INTO education (degree, institution, logo_url, year_range, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.degree)
        .bind(data.institution)
        .bind(data.logo_url)
        .bind(data.year_range)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(education)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let education = sqlx::query_as::<_, Education>(&format!(
            "SELECT {COLUMNS} FROM education WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(education)
    }

    /// Lists all education entries in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let entries =
            sqlx::query_as::<_, Education>(&format!("SELECT {COLUMNS} FROM education ORDER BY id"))
                .fetch_all(pool)
                .await?;

        Ok(entries)
    }

    /// Updates an education entry, returning None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateEducation,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE education SET updated_at = NOW()");

        if let Some(degree) = data.degree {
            query.push(", degree = ").push_bind(degree);
        }
        if let Some(institution) = data.institution {
            query.push(", institution = ").push_bind(institution);
        }
        if let Some(logo_url) = data.logo_url {
            query.push(", logo_url = ").push_bind(logo_url);
        }
        if let Some(year_range) = data.year_range {
            query.push(", year_range = ").push_bind(year_range);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let education = query
            .build_query_as::<Education>()
            .fetch_optional(pool)
            .await?;

        Ok(education)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM education WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
