/// Inbox read state
///
/// # Endpoint
///
/// ```text
/// POST /api/message/read/:id
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "unread_count": 3 }
/// ```
///
/// Marking an already-read message is a no-op that still reports the count.

use axum::{
    extract::{Path, State},
    Json,
};
use folio_shared::models::contact_message::ContactMessage;
use serde::Serialize;
use tracing::debug;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Mark-as-read response
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub unread_count: i64,
}

/// Mark a message as read
///
/// # Errors
///
/// - `404 Not Found`: No message with this id
pub async fn mark_message_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MarkReadResponse>> {
    let changed = ContactMessage::mark_read(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Message {} not found", id)))?;

    debug!(message_id = id, changed, "Message marked read");

    let unread_count = ContactMessage::count_unread(&state.db).await?;

    Ok(Json(MarkReadResponse {
        success: true,
        unread_count,
    }))
}
