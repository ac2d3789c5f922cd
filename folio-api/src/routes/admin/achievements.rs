/// Achievement management
///
/// Form fields: `title`, `description`, `date`, `link`. No uploads.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::models::achievement::{Achievement, CreateAchievement, UpdateAchievement};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

pub async fn add_achievement(
    State(state): State<AppState>,
    form: AdminForm,
) -> ApiResult<Response> {
    let data = CreateAchievement {
        title: form.required("title")?,
        description: form.required("description")?,
        date: form.required("date")?,
        link: form.required("link")?,
    };

    let achievement = Achievement::create(&state.db, data).await?;

    info!(achievement_id = achievement.id, "Achievement added");
    Ok(back_to(Tab::Achievements))
}

pub async fn edit_achievement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    let update = UpdateAchievement {
        title: form.text("title"),
        description: form.text("description"),
        date: form.text("date"),
        link: form.text("link"),
    };

    Achievement::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Achievement", id))?;

    info!(achievement_id = id, "Achievement updated");
    Ok(back_to_with_flash(&state, Tab::Achievements, "Achievement updated successfully!"))
}

pub async fn delete_achievement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Achievement::delete(&state.db, id).await?;

    info!(achievement_id = id, removed, "Achievement deleted");
    Ok(back_to(Tab::Achievements))
}
