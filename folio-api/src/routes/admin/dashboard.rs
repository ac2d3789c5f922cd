/// Admin dashboard
///
/// # Endpoint
///
/// ```text
/// GET /dashboard?tab=skills
/// GET /
/// ```
///
/// Returns every content list, the inbox (newest first) with its unread
/// count, the selected tab (default `messages`) and the set of image URLs
/// already in use so the editor can offer them again.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use folio_shared::models::{
    about::About, achievement::Achievement, blog::Blog, contact_message::ContactMessage,
    education::Education, experience::Experience, project::Project, research::Research,
    skill::Skill,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Tab;
use crate::{
    app::AppState,
    error::ApiResult,
    routes::flash::{clear_if_shown, take_flash},
};

/// Dashboard query string
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

/// Dashboard payload
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub about: Option<About>,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub research: Vec<Research>,
    pub achievements: Vec<Achievement>,
    pub blogs: Vec<Blog>,
    pub messages: Vec<ContactMessage>,
    pub unread_count: i64,
    pub active_tab: String,
    pub image_history: Vec<String>,
    pub flash: Option<String>,
}

/// Distinct, sorted image URLs from the profile and projects
pub fn image_history(about: Option<&About>, projects: &[Project]) -> Vec<String> {
    let profile = about
        .into_iter()
        .flat_map(|a| [a.profile_image.as_deref(), a.mini_profile_image.as_deref()]);
    let project_images = projects.iter().map(|p| p.image_url.as_deref());

    profile
        .chain(project_images)
        .flatten()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Dashboard handler
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let db = &state.db;

    let about = About::get(db).await?;
    let projects = Project::list(db).await?;
    let image_history = image_history(about.as_ref(), &projects);

    let flash = take_flash(&headers);
    let shown = flash.is_some();

    let dashboard = Dashboard {
        skills: Skill::list(db).await?,
        education: Education::list(db).await?,
        experience: Experience::list(db).await?,
        research: Research::list(db).await?,
        achievements: Achievement::list(db).await?,
        blogs: Blog::list(db).await?,
        messages: ContactMessage::list_newest_first(db).await?,
        unread_count: ContactMessage::count_unread(db).await?,
        active_tab: query
            .tab
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Tab::Messages.as_str().to_string()),
        image_history,
        about,
        projects,
        flash,
    };

    Ok(clear_if_shown(shown, state.secure_cookies(), Json(dashboard)))
}
