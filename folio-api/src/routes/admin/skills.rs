/// Skill management
///
/// # Endpoints
///
/// - `POST /add/skill` - Form `name`, `percentage`, file `image_file`
/// - `POST /edit/skill/:id` - Same fields; only submitted ones change
/// - `GET|POST /delete/skill/:id`
///
/// All redirect to `/dashboard?tab=skills`.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::{
    models::skill::{CreateSkill, Skill, UpdateSkill},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;
use validator::Validate;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{
    app::AppState,
    error::ApiResult,
    forms::{AdminForm, FormError},
};

/// Submitted skill fields
#[derive(Debug, Validate)]
pub struct SkillFields {
    pub name: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Percentage must be between 0 and 100"))]
    pub percentage: Option<i32>,
}

impl SkillFields {
    pub fn from_form(form: &AdminForm) -> ApiResult<Self> {
        let fields = Self {
            name: form.text("name"),
            percentage: form.parsed("percentage")?,
        };
        fields.validate()?;

        Ok(fields)
    }
}

/// Add a skill
pub async fn add_skill(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let fields = SkillFields::from_form(&form)?;
    let name = fields
        .name
        .ok_or_else(|| FormError::MissingField("name".to_string()))?;
    let percentage = fields
        .percentage
        .ok_or_else(|| FormError::MissingField("percentage".to_string()))?;

    let image_url =
        store_upload(state.storage.as_ref(), form.file("image_file"), UploadFolder::Skills).await;

    let skill = Skill::create(
        &state.db,
        CreateSkill {
            name,
            percentage,
            image_url,
        },
    )
    .await?;

    info!(skill_id = skill.id, "Skill added");
    Ok(back_to(Tab::Skills))
}

/// Edit a skill
pub async fn edit_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    let fields = SkillFields::from_form(&form)?;

    Skill::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Skill", id))?;

    let image_url =
        store_upload(state.storage.as_ref(), form.file("image_file"), UploadFolder::Skills).await;

    Skill::update(
        &state.db,
        id,
        UpdateSkill {
            name: fields.name,
            percentage: fields.percentage,
            image_url,
        },
    )
    .await?
    .ok_or_else(|| not_found("Skill", id))?;

    info!(skill_id = id, "Skill updated");
    Ok(back_to_with_flash(&state, Tab::Skills, "Skill updated successfully!"))
}

/// Delete a skill
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Skill::delete(&state.db, id).await?;

    info!(skill_id = id, removed, "Skill deleted");
    Ok(back_to(Tab::Skills))
}
