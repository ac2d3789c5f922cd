/// Project management
///
/// # Endpoints
///
/// - `POST /add/project` - Form `title`, `category`, `project_link`,
///   `image_url`, file `image_file`
/// - `POST /edit/project/:id`
/// - `GET|POST /delete/project/:id`
///
/// The image may be given as a URL (e.g. one picked from the dashboard's
/// image history) or uploaded. An uploaded file wins over the URL field.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::{
    models::project::{CreateProject, Project, UpdateProject},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

/// Add a project
pub async fn add_project(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let title = form.required("title")?;
    let category = form.required("category")?;
    let project_link = form.required("project_link")?;

    let uploaded =
        store_upload(state.storage.as_ref(), form.file("image_file"), UploadFolder::Projects).await;
    let image_url = uploaded.or_else(|| form.non_empty("image_url"));

    let project = Project::create(
        &state.db,
        CreateProject {
            title,
            category,
            image_url,
            project_link,
        },
    )
    .await?;

    info!(project_id = project.id, "Project added");
    Ok(back_to(Tab::Projects))
}

/// Edit a project
///
/// An empty `image_url` keeps the current image.
pub async fn edit_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    let uploaded =
        store_upload(state.storage.as_ref(), form.file("image_file"), UploadFolder::Projects).await;

    let update = UpdateProject {
        title: form.text("title"),
        category: form.text("category"),
        image_url: uploaded.or_else(|| form.non_empty("image_url")),
        project_link: form.text("project_link"),
    };

    Project::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    info!(project_id = id, "Project updated");
    Ok(back_to_with_flash(&state, Tab::Projects, "Project updated successfully!"))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Project::delete(&state.db, id).await?;

    info!(project_id = id, removed, "Project deleted");
    Ok(back_to(Tab::Projects))
}
