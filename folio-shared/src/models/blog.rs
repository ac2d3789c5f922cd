/// Blog post model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE blogs (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     tags TEXT NOT NULL,
///     date TEXT NOT NULL,
///     cover_image TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, title, content, tags, date, cover_image, created_at, updated_at";

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,

    /// Post body as authored (markdown or HTML, rendered by the frontend)
    pub content: String,

    /// Comma-separated tag list, stored as entered
    pub tags: String,

    pub date: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlog {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub date: String,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub date: Option<String>,
    pub cover_image: Option<String>,
}

impl Blog {
    pub async fn create(pool: &PgPool, data: CreateBlog) -> Result<Self, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blogs (title, content, tags, date, cover_image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.title)
        .bind(data.content)
        .bind(data.tags)
        .bind(data.date)
        .bind(data.cover_image)
        .fetch_one(pool)
        .await?;

        Ok(blog)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let blog = sqlx::query_as::<_, Blog>(&format!("SELECT {COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(blog)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let blogs = sqlx::query_as::<_, Blog>(&format!("SELECT {COLUMNS} FROM blogs ORDER BY id"))
            .fetch_all(pool)
            .await?;

        Ok(blogs)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateBlog,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE blogs SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(content) = data.content {
            query.push(", content = ").push_bind(content);
        }
        if let Some(tags) = data.tags {
            query.push(", tags = ").push_bind(tags);
        }
        if let Some(date) = data.date {
            query.push(", date = ").push_bind(date);
        }
        if let Some(cover_image) = data.cover_image {
            query.push(", cover_image = ").push_bind(cover_image);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let blog = query.build_query_as::<Blog>().fetch_optional(pool).await?;

        Ok(blog)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
