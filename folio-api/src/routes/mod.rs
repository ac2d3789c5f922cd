/// API route handlers
///
/// This module contains all route handlers organized by audience:
///
/// - `health`: Health check endpoint
/// - `auth`: Sign-in and sign-out
/// - `flash`: One-shot messages carried across redirects
/// - `public`: Read-only content API and the contact form
/// - `admin`: Dashboard, inbox and content management

pub mod admin;
pub mod auth;
pub mod flash;
pub mod health;
pub mod public;
