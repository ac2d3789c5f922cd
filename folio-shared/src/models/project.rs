/// Project model and database operations
///
/// Projects carry a cover image that is either an uploaded file or a URL
/// typed into the admin form. Their image URLs also feed the dashboard's
/// image history.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     category TEXT NOT NULL,
///     image_url TEXT,
///     project_link TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, title, category, image_url, project_link, created_at, updated_at";

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,

    /// Filter category used by the portfolio grid (e.g. "web", "app")
    pub category: String,

    pub image_url: Option<String>,

    /// Link to the live project or its repository
    pub project_link: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub project_link: String,
}

/// Input for updating a project; only non-None fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub project_link: Option<String>,
}

impl Project {
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (title, category, image_url, project_link)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.title)
        .bind(data.category)
        .bind(data.image_url)
        .bind(data.project_link)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project =
            sqlx::query_as::<_, Project>(&format!("SELECT {COLUMNS} FROM projects WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(project)
    }

    /// Lists all projects in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects =
            sqlx::query_as::<_, Project>(&format!("SELECT {COLUMNS} FROM projects ORDER BY id"))
                .fetch_all(pool)
                .await?;

        Ok(projects)
    }

    /// Updates a project
    ///
    /// # Returns
    ///
    /// The updated project if found, None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE projects SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(category) = data.category {
            query.push(", category = ").push_bind(category);
        }
        if let Some(image_url) = data.image_url {
            query.push(", image_url = ").push_bind(image_url);
        }
        if let Some(project_link) = data.project_link {
            query.push(", project_link = ").push_bind(project_link);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let project = query.build_query_as::<Project>().fetch_optional(pool).await?;

        Ok(project)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
