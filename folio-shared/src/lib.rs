//! # Folio Shared Library
//!
//! This crate contains the data layer and external-service clients used by the
//! Folio API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Portfolio content records and their CRUD operations
//! - `auth`: Session tokens, auth context and the identity provider client
//! - `storage`: Object storage client and the upload helper

pub mod auth;
pub mod db;
pub mod models;
pub mod storage;

/// Current version of the Folio shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
