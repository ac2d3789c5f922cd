/// Admin form extraction
///
/// Admin pages post either `multipart/form-data` (when a file input is
/// present) or `application/x-www-form-urlencoded`. [`AdminForm`] accepts
/// both and exposes text fields and file parts by name.
///
/// # Example
///
/// ```no_run
/// use folio_api::{error::ApiResult, forms::AdminForm};
///
/// async fn handler(form: AdminForm) -> ApiResult<String> {
///     let title = form.required("title")?;
///     let has_cover = form.file("cover_file").is_some();
///     Ok(format!("{} (cover: {})", title, has_cover))
/// }
/// ```

use async_trait::async_trait;
use axum::{
    extract::{Form, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use folio_shared::storage::upload::UploadedFile;
use std::{collections::HashMap, str::FromStr};

use crate::error::ApiError;

/// Error type for form extraction and field access
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A required field was not submitted
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field was submitted but could not be parsed
    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    /// The body could not be decoded
    #[error("Malformed form body: {0}")]
    Malformed(String),
}

/// Decoded admin form submission
#[derive(Debug, Clone, Default)]
pub struct AdminForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl AdminForm {
    /// Builds a form from already-decoded parts
    pub fn from_parts(
        fields: HashMap<String, String>,
        files: HashMap<String, UploadedFile>,
    ) -> Self {
        Self { fields, files }
    }

    /// Value of a text field, if it was submitted (possibly empty)
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Value of a text field, only if it was submitted with content
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    /// Value of a field that must be present
    pub fn required(&self, name: &str) -> Result<String, FormError> {
        self.text(name)
            .ok_or_else(|| FormError::MissingField(name.to_string()))
    }

    /// Parses a field if it was submitted
    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>, FormError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.fields
            .get(name)
            .map(|value| {
                value.trim().parse::<T>().map_err(|e| FormError::InvalidField {
                    field: name.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Parses a field that must be present
    pub fn required_parsed<T>(&self, name: &str) -> Result<T, FormError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parsed(name)?
            .ok_or_else(|| FormError::MissingField(name.to_string()))
    }

    /// File part submitted under `name`
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// True when nothing at all was submitted
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}

fn is_multipart(req: &Request) -> bool {
    content_type(req).starts_with("multipart/form-data")
}

fn is_urlencoded(req: &Request) -> bool {
    content_type(req).starts_with("application/x-www-form-urlencoded")
}

fn content_type(req: &Request) -> &str {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

async fn read_multipart(mut multipart: Multipart) -> Result<AdminForm, FormError> {
    let mut form = AdminForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Malformed(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Malformed(e.body_text()))?;

                form.files.entry(name).or_insert(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| FormError::Malformed(e.body_text()))?;

                form.fields.entry(name).or_insert(value);
            }
        }
    }

    Ok(form)
}

#[async_trait]
impl<S> FromRequest<S> for AdminForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| FormError::Malformed(e.body_text()))?;
            return Ok(read_multipart(multipart).await?);
        }

        if is_urlencoded(&req) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| FormError::Malformed(e.body_text()))?;

            let mut fields = HashMap::new();
            for (name, value) in pairs {
                fields.entry(name).or_insert(value);
            }
            return Ok(AdminForm::from_parts(fields, HashMap::new()));
        }

        // Bodiless posts (e.g. a bare button) carry no fields
        Ok(AdminForm::default())
    }
}
