/// Database models for Folio
///
/// Each record is a flat table with no relationships. Content models share the
/// same lifecycle: created by an admin form, edited in place, deleted by id.
///
/// # Models
///
/// - `user`: Local shadow of the identity-provider account (session mapping)
/// - `about`: Singleton profile record
/// - `skill`, `education`, `experience`, `project`, `research`,
///   `achievement`, `blog`: Portfolio content lists
/// - `contact_message`: Inbox entries submitted through the public API
///
/// # Example
///
/// ```no_run
/// use folio_shared::models::skill::{CreateSkill, Skill};
/// use folio_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let skill = Skill::create(
///     &pool,
///     CreateSkill {
///         name: "Rust".to_string(),
///         percentage: 90,
///         image_url: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod about;
pub mod achievement;
pub mod blog;
pub mod contact_message;
pub mod education;
pub mod experience;
pub mod project;
pub mod research;
pub mod skill;
pub mod user;
