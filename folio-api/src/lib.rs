//! # Folio API Server Library
//!
//! This library provides the core functionality for the Folio portfolio
//! backend: the admin surface, the public content API and the CLI.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `cli`: Command-line interface and the `create-admin` command
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `forms`: Multipart/urlencoded admin form extraction
//! - `middleware`: Security headers and session guards
//! - `routes`: Route handlers

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
