/// Research and thesis management
///
/// Form fields: `title`, `description`, `publication_date`, `link`; file
/// `research_pdf`. An uploaded PDF replaces the link.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::{
    models::research::{CreateResearch, Research, UpdateResearch},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

pub async fn add_research(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let title = form.required("title")?;
    let description = form.required("description")?;
    let publication_date = form.required("publication_date")?;

    let pdf = form.file("research_pdf");
    let uploaded = store_upload(state.storage.as_ref(), pdf, UploadFolder::Research).await;
    let link = uploaded.or_else(|| form.non_empty("link"));

    let research = Research::create(
        &state.db,
        CreateResearch {
            title,
            description,
            link,
            publication_date,
        },
    )
    .await?;

    info!(research_id = research.id, "Research added");
    Ok(back_to(Tab::Research))
}

pub async fn edit_research(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    Research::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Research", id))?;

    let pdf = form.file("research_pdf");
    let uploaded = store_upload(state.storage.as_ref(), pdf, UploadFolder::Research).await;

    let update = UpdateResearch {
        title: form.text("title"),
        description: form.text("description"),
        link: uploaded.or_else(|| form.text("link")),
        publication_date: form.text("publication_date"),
    };

    Research::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Research", id))?;

    info!(research_id = id, "Research updated");
    Ok(back_to_with_flash(&state, Tab::Research, "Research updated successfully!"))
}

pub async fn delete_research(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Research::delete(&state.db, id).await?;

    info!(research_id = id, removed, "Research deleted");
    Ok(back_to(Tab::Research))
}
