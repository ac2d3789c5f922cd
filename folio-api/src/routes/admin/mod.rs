/// Admin handlers
///
/// Everything here sits behind a session guard. Form handlers answer with a
/// 303 redirect back to the dashboard tab the change belongs to.
///
/// - `dashboard`: Aggregated dashboard data
/// - `messages`: Inbox read state
/// - `about`: Profile singleton
/// - `skills`, `education`, `experience`, `projects`, `research`,
///   `achievements`, `blogs`: Add, edit and delete per content type

pub mod about;
pub mod achievements;
pub mod blogs;
pub mod dashboard;
pub mod education;
pub mod experience;
pub mod messages;
pub mod projects;
pub mod research;
pub mod skills;

use axum::response::Response;

use super::flash::{redirect, redirect_with_flash};
use crate::{app::AppState, error::ApiError};

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Messages,
    About,
    Skills,
    Education,
    Experience,
    Projects,
    Research,
    Achievements,
    Blog,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Messages => "messages",
            Tab::About => "about",
            Tab::Skills => "skills",
            Tab::Education => "education",
            Tab::Experience => "experience",
            Tab::Projects => "projects",
            Tab::Research => "research",
            Tab::Achievements => "achievements",
            Tab::Blog => "blog",
        }
    }

    /// Dashboard URL with this tab selected
    pub fn location(&self) -> String {
        format!("/dashboard?tab={}", self.as_str())
    }
}

/// Redirect back to `tab`
pub(crate) fn back_to(tab: Tab) -> Response {
    redirect(&tab.location())
}

/// Redirect back to `tab` with a flash message
pub(crate) fn back_to_with_flash(state: &AppState, tab: Tab, message: &str) -> Response {
    redirect_with_flash(&tab.location(), message, state.secure_cookies())
}

/// 404 for an edit aimed at a record that doesn't exist
pub(crate) fn not_found(kind: &str, id: i64) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_locations() {
        assert_eq!(Tab::Skills.location(), "/dashboard?tab=skills");
        assert_eq!(Tab::Projects.location(), "/dashboard?tab=projects");
        assert_eq!(Tab::Achievements.location(), "/dashboard?tab=achievements");
        assert_eq!(Tab::Blog.location(), "/dashboard?tab=blog");
    }
}
