/// About (profile) model and database operations
///
/// The `about` table holds a single logical row: the portfolio owner's bio,
/// contact details, social links, resume and profile images. The singleton is
/// the row with the lowest id; `upsert` creates it on first write.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE about (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT, birthday TEXT, website TEXT, phone TEXT, city TEXT,
///     age TEXT, degree TEXT, email TEXT, freelance_status TEXT,
///     short_bio TEXT, long_bio TEXT,
///     github TEXT, facebook TEXT, linkedin TEXT, whatsapp TEXT,
///     instagram TEXT, twitter TEXT,
///     profile_image TEXT, resume_link TEXT, mini_profile_image TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use folio_shared::models::about::{About, UpdateAbout};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let about = About::upsert(
///     &pool,
///     UpdateAbout {
///         name: Some("Ada Lovelace".to_string()),
///         city: Some("London".to_string()),
///         ..Default::default()
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, name, birthday, website, phone, city, age, degree, email, \
    freelance_status, short_bio, long_bio, github, facebook, linkedin, whatsapp, instagram, \
    twitter, resume_link, profile_image, mini_profile_image, created_at, updated_at";

/// The singleton profile record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct About {
    pub id: i64,

    // Basic info
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub age: Option<String>,
    pub degree: Option<String>,
    pub email: Option<String>,
    pub freelance_status: Option<String>,
    pub short_bio: Option<String>,
    pub long_bio: Option<String>,

    // Social links
    pub github: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,

    // Assets
    pub resume_link: Option<String>,
    pub profile_image: Option<String>,
    pub mini_profile_image: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to write on the profile
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAbout {
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub age: Option<String>,
    pub degree: Option<String>,
    pub email: Option<String>,
    pub freelance_status: Option<String>,
    pub short_bio: Option<String>,
    pub long_bio: Option<String>,
    pub github: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub resume_link: Option<String>,
    pub profile_image: Option<String>,
    pub mini_profile_image: Option<String>,
}

impl UpdateAbout {
    /// Column/value pairs for every field that is set, in schema order
    fn assignments(self) -> Vec<(&'static str, String)> {
        [
            ("name", self.name),
            ("birthday", self.birthday),
            ("website", self.website),
            ("phone", self.phone),
            ("city", self.city),
            ("age", self.age),
            ("degree", self.degree),
            ("email", self.email),
            ("freelance_status", self.freelance_status),
            ("short_bio", self.short_bio),
            ("long_bio", self.long_bio),
            ("github", self.github),
            ("facebook", self.facebook),
            ("linkedin", self.linkedin),
            ("whatsapp", self.whatsapp),
            ("instagram", self.instagram),
            ("twitter", self.twitter),
            ("resume_link", self.resume_link),
            ("profile_image", self.profile_image),
            ("mini_profile_image", self.mini_profile_image),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }
}

impl About {
    /// Returns the profile, or None if it has never been written
    pub async fn get(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let about =
            sqlx::query_as::<_, About>(&format!("SELECT {COLUMNS} FROM about ORDER BY id LIMIT 1"))
                .fetch_optional(pool)
                .await?;

        Ok(about)
    }

    /// Creates the profile with `default_name` if no row exists yet
    ///
    /// Returns the existing or newly created profile.
    pub async fn ensure_exists(pool: &PgPool, default_name: &str) -> Result<Self, sqlx::Error> {
        if let Some(about) = Self::get(pool).await? {
            return Ok(about);
        }

        let about = sqlx::query_as::<_, About>(&format!(
            "INSERT INTO about (name) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(default_name)
        .fetch_one(pool)
        .await?;

        Ok(about)
    }

    /// Writes the provided fields onto the profile, creating it if missing
    ///
    /// Runs in a single transaction; the table is locked for the duration so
    /// two concurrent first writes cannot create two singleton rows.
    pub async fn upsert(pool: &PgPool, data: UpdateAbout) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("LOCK TABLE about IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM about ORDER BY id LIMIT 1")
            .fetch_optional(&mut *tx)
            .await?;

        let id = match existing {
            Some((id,)) => id,
            None => {
                let (id,): (i64,) =
                    sqlx::query_as("INSERT INTO about DEFAULT VALUES RETURNING id")
                        .fetch_one(&mut *tx)
                        .await?;
                id
            }
        };

        let mut query = QueryBuilder::<Postgres>::new("UPDATE about SET updated_at = NOW()");
        for (column, value) in data.assignments() {
            query.push(", ").push(column).push(" = ").push_bind(value);
        }
        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING ").push(COLUMNS);

        let about = query.build_query_as::<About>().fetch_one(&mut *tx).await?;

        tx.commit().await?;

        Ok(about)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignments_skip_unset_fields() {
        let update = UpdateAbout {
            name: Some("Ada".to_string()),
            twitter: Some("@ada".to_string()),
            ..Default::default()
        };

        let assignments = update.assignments();
        assert_eq!(
            assignments,
            vec![("name", "Ada".to_string()), ("twitter", "@ada".to_string())]
        );
    }

    #[test]
    fn test_assignments_empty_update() {
        assert!(UpdateAbout::default().assignments().is_empty());
    }
}
