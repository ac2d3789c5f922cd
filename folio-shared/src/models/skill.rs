/// Skill model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE skills (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     percentage INTEGER NOT NULL CHECK (percentage BETWEEN 0 AND 100),
///     image_url TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use folio_shared::models::skill::{Skill, UpdateSkill};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// // Only the proficiency changes; name and icon stay as they are
/// let update = UpdateSkill {
///     percentage: Some(75),
///     ..Default::default()
/// };
///
/// if let Some(skill) = Skill::update(&pool, 1, update).await? {
///     println!("{} is now at {}%", skill.name, skill.percentage);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, name, percentage, image_url, created_at, updated_at";

/// A skill shown with a proficiency bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    /// Unique skill ID
    pub id: i64,

    /// Display name (e.g. "Rust")
    pub name: String,

    /// Proficiency, 0 to 100
    pub percentage: i32,

    /// Optional icon URL
    pub image_url: Option<String>,

    /// When the skill was created
    pub created_at: DateTime<Utc>,

    /// When the skill was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub percentage: i32,
    pub image_url: Option<String>,
}

/// Input for updating an existing skill
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSkill {
    pub name: Option<String>,
    pub percentage: Option<i32>,
    pub image_url: Option<String>,
}

impl Skill {
    /// Creates a new skill
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage is outside 0..=100 (check constraint)
    /// or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateSkill) -> Result<Self, sqlx::Error> {
        let skill = sqlx::query_as::<_, Skill>(&format!(
            r#"
            INSERT INTO skills (name, percentage, image_url)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.percentage)
        .bind(data.image_url)
        .fetch_one(pool)
        .await?;

        Ok(skill)
    }

    /// Finds a skill by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let skill =
            sqlx::query_as::<_, Skill>(&format!("SELECT {COLUMNS} FROM skills WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(skill)
    }

    /// Lists all skills in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let skills =
            sqlx::query_as::<_, Skill>(&format!("SELECT {COLUMNS} FROM skills ORDER BY id"))
                .fetch_all(pool)
                .await?;

        Ok(skills)
    }

    /// Updates an existing skill
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is always bumped.
    ///
    /// # Returns
    ///
    /// The updated skill if found, None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateSkill,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE skills SET updated_at = NOW()");

        if let Some(name) = data.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(percentage) = data.percentage {
            query.push(", percentage = ").push_bind(percentage);
        }
        if let Some(image_url) = data.image_url {
            query.push(", image_url = ").push_bind(image_url);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let skill = query.build_query_as::<Skill>().fetch_optional(pool).await?;

        Ok(skill)
    }

    /// Deletes a skill by ID
    ///
    /// Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
