/// Profile editor
///
/// # Endpoint
///
/// ```text
/// POST /update/about
/// ```
///
/// Text fields that are submitted are written as-is; fields left out of the
/// form keep their stored value. The three asset fields (`resume_link`,
/// `profile_image`, `mini_profile_image`) are only applied when non-empty, and
/// a successful upload in the matching file part wins over the text value.

use axum::{extract::State, response::Response};
use folio_shared::{
    models::about::{About, UpdateAbout},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;

use super::{back_to_with_flash, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

/// Builds the profile update from the submitted text fields
pub fn about_update(form: &AdminForm) -> UpdateAbout {
    UpdateAbout {
        name: form.text("name"),
        birthday: form.text("birthday"),
        website: form.text("website"),
        phone: form.text("phone"),
        city: form.text("city"),
        age: form.text("age"),
        degree: form.text("degree"),
        email: form.text("email"),
        freelance_status: form.text("freelance_status"),
        short_bio: form.text("short_bio"),
        long_bio: form.text("long_bio"),
        github: form.text("github"),
        facebook: form.text("facebook"),
        linkedin: form.text("linkedin"),
        whatsapp: form.text("whatsapp"),
        instagram: form.text("instagram"),
        twitter: form.text("twitter"),
        resume_link: form.non_empty("resume_link"),
        profile_image: form.non_empty("profile_image"),
        mini_profile_image: form.non_empty("mini_profile_image"),
    }
}

/// Update the profile, creating it on first save
pub async fn update_about(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let storage = state.storage.as_ref();
    let mut update = about_update(&form);

    let resume = store_upload(storage, form.file("resume_file"), UploadFolder::Resumes).await;
    let profile = store_upload(storage, form.file("image_file"), UploadFolder::Profile).await;
    let mini = store_upload(storage, form.file("mini_image_file"), UploadFolder::Profile).await;

    // A failed or missing upload keeps whatever the text fields left in place
    update.resume_link = resume.or(update.resume_link);
    update.profile_image = profile.or(update.profile_image);
    update.mini_profile_image = mini.or(update.mini_profile_image);

    let about = About::upsert(&state.db, update).await?;
    info!(about_id = about.id, "Profile updated");

    Ok(back_to_with_flash(&state, Tab::About, "About section updated!"))
}
