/// PostgreSQL access
///
/// `pool` builds the shared connection pool and `migrations` keeps the schema
/// current. Row types and their queries live in [`crate::models`].

pub mod migrations;
pub mod pool;
