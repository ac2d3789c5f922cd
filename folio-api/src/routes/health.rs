/// `GET /health`
///
/// Answers 200 while the process is up. A database outage is reported in the
/// body as `"status": "degraded"` so an uptime probe can tell the two apart.

use crate::app::AppState;
use axum::{extract::State, Json};
use folio_shared::db::pool;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseState {
    Connected,
    Disconnected,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    pub version: String,
    pub database: DatabaseState,
}

impl HealthResponse {
    fn new(database: DatabaseState) -> Self {
        let status = match database {
            DatabaseState::Connected => "healthy",
            DatabaseState::Disconnected => "degraded",
        };

        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match pool::health_check(&state.db).await {
        Ok(()) => DatabaseState::Connected,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            DatabaseState::Disconnected
        }
    };

    Json(HealthResponse::new(database))
}
