/// Experience management
///
/// Form fields: `role`, `company`, `year_range`, `description`. No uploads.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::models::experience::{CreateExperience, Experience, UpdateExperience};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

pub async fn add_experience(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let data = CreateExperience {
        role: form.required("role")?,
        company: form.required("company")?,
        year_range: form.required("year_range")?,
        description: form.required("description")?,
    };

    let experience = Experience::create(&state.db, data).await?;

    info!(experience_id = experience.id, "Experience added");
    Ok(back_to(Tab::Experience))
}

pub async fn edit_experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    let update = UpdateExperience {
        role: form.text("role"),
        company: form.text("company"),
        year_range: form.text("year_range"),
        description: form.text("description"),
    };

    Experience::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Experience", id))?;

    info!(experience_id = id, "Experience updated");
    Ok(back_to_with_flash(&state, Tab::Experience, "Experience updated successfully!"))
}

pub async fn delete_experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Experience::delete(&state.db, id).await?;

    info!(experience_id = id, removed, "Experience deleted");
    Ok(back_to(Tab::Experience))
}
