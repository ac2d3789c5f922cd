/// Public content API
///
/// Read-only JSON views of everything the admin manages, plus the contact
/// form endpoint. No session is required.
///
/// # Endpoints
///
/// - `GET /api/about` - Profile object, or `{}` before it is first written
/// - `GET /api/skills`, `/api/education`, `/api/experience`, `/api/projects`,
///   `/api/research`, `/api/achievements`, `/api/blogs` - Arrays in insertion order
/// - `POST /api/contact` - JSON or form body; stores an unread inbox message

use axum::{
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use folio_shared::models::{
    about::About,
    achievement::Achievement,
    blog::Blog,
    contact_message::{ContactMessage, CreateContactMessage},
    education::Education,
    experience::Experience,
    project::Project,
    research::Research,
    skill::Skill,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    forms::AdminForm,
};

/// Contact form submission
///
/// Every field is optional; blank strings count as absent.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 300, message = "Subject must be at most 300 characters"))]
    pub subject: Option<String>,

    #[validate(length(max = 10000, message = "Message must be at most 10000 characters"))]
    pub message: Option<String>,
}

impl ContactRequest {
    fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            name: blank_to_none(self.name),
            email: blank_to_none(self.email),
            subject: blank_to_none(self.subject),
            message: blank_to_none(self.message),
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }

    fn from_form(form: &AdminForm) -> Self {
        Self {
            name: form.text("name"),
            email: form.text("email"),
            subject: form.text("subject"),
            message: form.text("message"),
        }
    }
}

/// Contact form acknowledgement
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

fn no_data() -> ApiError {
    ApiError::BadRequest("No data provided".to_string())
}

async fn read_contact(req: Request, state: &AppState) -> ApiResult<ContactRequest> {
    let is_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if body.is_empty() {
            return Err(no_data());
        }

        let parsed: Option<ContactRequest> = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        return parsed.ok_or_else(no_data);
    }

    let form = AdminForm::from_request(req, state).await?;
    if form.is_empty() {
        return Err(no_data());
    }
    Ok(ContactRequest::from_form(&form))
}

/// Store a contact form submission
pub async fn contact(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<(StatusCode, Json<ContactResponse>)> {
    let payload = read_contact(req, &state).await?.normalized();
    if payload.is_empty() {
        return Err(no_data());
    }
    payload.validate()?;

    let message = ContactMessage::create(
        &state.db,
        CreateContactMessage {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
        },
    )
    .await?;

    info!(message_id = message.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Message sent successfully!".to_string(),
        }),
    ))
}

/// Profile, or an empty object when none exists yet
pub async fn about(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let about = About::get(&state.db).await?;

    let body = match about {
        Some(about) => serde_json::to_value(about)
            .map_err(|e| ApiError::InternalError(format!("Serialization failed: {}", e)))?,
        None => json!({}),
    };

    Ok(Json(body))
}

pub async fn skills(State(state): State<AppState>) -> ApiResult<Json<Vec<Skill>>> {
    Ok(Json(Skill::list(&state.db).await?))
}

pub async fn education(State(state): State<AppState>) -> ApiResult<Json<Vec<Education>>> {
    Ok(Json(Education::list(&state.db).await?))
}

pub async fn experience(State(state): State<AppState>) -> ApiResult<Json<Vec<Experience>>> {
    Ok(Json(Experience::list(&state.db).await?))
}

pub async fn projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(Project::list(&state.db).await?))
}

pub async fn research(State(state): State<AppState>) -> ApiResult<Json<Vec<Research>>> {
    Ok(Json(Research::list(&state.db).await?))
}

pub async fn achievements(State(state): State<AppState>) -> ApiResult<Json<Vec<Achievement>>> {
    Ok(Json(Achievement::list(&state.db).await?))
}

pub async fn blogs(State(state): State<AppState>) -> ApiResult<Json<Vec<Blog>>> {
    Ok(Json(Blog::list(&state.db).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let payload = ContactRequest {
            name: Some("  ".to_string()),
            email: Some(String::new()),
            subject: None,
            message: Some("Hello".to_string()),
        }
        .normalized();

        assert!(payload.name.is_none());
        assert!(payload.email.is_none());
        assert_eq!(payload.message.as_deref(), Some("Hello"));
        assert!(!payload.is_empty());
        assert!(ContactRequest::default().is_empty());
    }

    #[test]
    fn test_contact_validation() {
        let valid = ContactRequest {
            email: Some("visitor@example.com".to_string()),
            message: Some("Hi!".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = ContactRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let err: ApiError = invalid.validate().unwrap_err().into();
        assert!(matches!(err, ApiError::ValidationError(ref d) if d[0].field == "email"));
    }
}
