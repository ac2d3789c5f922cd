/// Middleware modules for the API server
///
/// - `security`: Security response headers
/// - `session`: Session guards for the admin surface

pub mod security;
pub mod session;
