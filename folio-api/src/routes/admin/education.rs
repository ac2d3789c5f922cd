/// Education management
///
/// # Endpoints
///
/// - `POST /add/education` - Form `degree`, `institution`, `year_range`,
///   `description`, file `logo_file`
/// - `POST /edit/education/:id`
/// - `GET|POST /delete/education/:id`

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::{
    models::education::{CreateEducation, Education, UpdateEducation},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

/// Add an education entry
pub async fn add_education(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let degree = form.required("degree")?;
    let institution = form.required("institution")?;
    let year_range = form.required("year_range")?;
    let description = form.required("description")?;

    let logo_url =
        store_upload(state.storage.as_ref(), form.file("logo_file"), UploadFolder::Education).await;

    let education = Education::create(
        &state.db,
        CreateEducation {
            degree,
            institution,
            logo_url,
            year_range,
            description,
        },
    )
    .await?;

    info!(education_id = education.id, "Education added");
    Ok(back_to(Tab::Education))
}

/// Edit an education entry
pub async fn edit_education(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    Education::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Education", id))?;

    let logo_url =
        store_upload(state.storage.as_ref(), form.file("logo_file"), UploadFolder::Education).await;

    let update = UpdateEducation {
        degree: form.text("degree"),
        institution: form.text("institution"),
        logo_url,
        year_range: form.text("year_range"),
        description: form.text("description"),
    };

    Education::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Education", id))?;

    info!(education_id = id, "Education updated");
    Ok(back_to_with_flash(&state, Tab::Education, "Education updated successfully!"))
}

/// Delete an education entry
pub async fn delete_education(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Education::delete(&state.db, id).await?;

    info!(education_id = id, removed, "Education deleted");
    Ok(back_to(Tab::Education))
}
