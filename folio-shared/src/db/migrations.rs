/// Schema migrations
///
/// The SQL files under the workspace `migrations/` directory are compiled
/// into the binary, so a deployed server never depends on files next to it.
/// Files are named `{timestamp}_{name}.sql` and applied once each, oldest
/// first. The server applies anything pending on every start.
///
/// ```no_run
/// use folio_shared::db::migrations::{migration_status, run_migrations};
/// use folio_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::for_url(std::env::var("DATABASE_URL")?)).await?;
/// run_migrations(&pool).await?;
///
/// let status = migration_status(&pool).await?;
/// assert!(status.is_up_to_date);
/// # Ok(())
/// # }
/// ```

use sqlx::{
    migrate::{MigrateDatabase, MigrateError, Migrator},
    postgres::PgPool,
    Postgres,
};
use tracing::{debug, error, info};

/// Embedded migrations from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Where the database schema stands relative to the embedded migrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Successfully applied migrations
    pub applied_migrations: usize,

    /// Highest applied version, `None` on a fresh database
    pub latest_version: Option<i64>,

    /// Embedded versions not yet recorded as applied
    pub pending_versions: Vec<i64>,

    /// True when nothing is pending
    pub is_up_to_date: bool,
}

/// Applies every pending migration
///
/// Versions already recorded in `_sqlx_migrations` are skipped. A recorded
/// migration whose checksum no longer matches the embedded file is an error.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!(embedded = MIGRATOR.iter().count(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        error!(error = %e, "Schema migration failed");
        e
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// Compares the applied versions against the embedded set
pub async fn migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let tracked: Option<String> =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations')::text")
            .fetch_one(pool)
            .await?;

    let applied: Vec<i64> = match tracked {
        Some(_) => {
            sqlx::query_scalar(
                "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version",
            )
            .fetch_all(pool)
            .await?
        }
        None => Vec::new(),
    };

    let pending_versions: Vec<i64> = MIGRATOR
        .iter()
        .map(|m| m.version)
        .filter(|v| !applied.contains(v))
        .collect();

    let status = MigrationStatus {
        applied_migrations: applied.len(),
        latest_version: applied.last().copied(),
        is_up_to_date: pending_versions.is_empty(),
        pending_versions,
    };

    debug!(?status, "Migration status");
    Ok(status)
}

/// Creates the database named in `database_url` when it is missing
///
/// Hosted databases are provisioned ahead of time; this is for local setups
/// and the test suites.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Creating database");
    Postgres::create_database(database_url).await
}
