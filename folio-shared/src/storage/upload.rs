/// Upload helper for admin form handlers
///
/// Takes a file part from a submitted form, stores it under a collision-safe
/// name and hands back the public URL. Failures are logged and reported as
/// `None` so the caller keeps whatever URL it already had.

use bytes::Bytes;
use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use super::client::ObjectStorage;

/// Content type used when the client didn't declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file part received in a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-supplied file name (untrusted)
    pub file_name: String,

    /// Client-declared MIME type
    pub content_type: Option<String>,

    pub bytes: Bytes,
}

/// Bucket subfolder an asset is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Resumes,
    Profile,
    Skills,
    Education,
    Projects,
    Research,
    Blog,
    Others,
}

impl UploadFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFolder::Resumes => "resumes",
            UploadFolder::Profile => "profile",
            UploadFolder::Skills => "skills",
            UploadFolder::Education => "education",
            UploadFolder::Projects => "projects",
            UploadFolder::Research => "research",
            UploadFolder::Blog => "blog",
            UploadFolder::Others => "others",
        }
    }
}

/// Reduces a client file name to a safe ASCII object name
///
/// Accented letters fold to their base letter under NFKD and any other
/// non-ASCII character is dropped. Path separators and whitespace runs
/// become `_`, anything outside `[A-Za-z0-9_.-]` is removed and leading or
/// trailing dots and underscores are stripped. Returns `file` if nothing is
/// left.
pub fn sanitize_filename(name: &str) -> String {
    let spaced: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Eight random hex characters used to keep object names unique
fn random_prefix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Object path for `file_name` inside `folder`
pub fn object_path(folder: UploadFolder, file_name: &str) -> String {
    format!(
        "{}/{}_{}",
        folder.as_str(),
        random_prefix(),
        sanitize_filename(file_name)
    )
}

/// Uploads `file` to `storage` under `folder` and returns its public URL
///
/// Returns `None` when no file was submitted, the file name is empty, or the
/// upload failed. There is no retry and nothing is cleaned up on failure.
pub async fn store_upload(
    storage: &dyn ObjectStorage,
    file: Option<&UploadedFile>,
    folder: UploadFolder,
) -> Option<String> {
    let file = file.filter(|f| !f.file_name.is_empty())?;

    let path = object_path(folder, &file.file_name);
    let content_type = file
        .content_type
        .as_deref()
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    info!(file_name = %file.file_name, path = %path, "Uploading asset");

    match storage.upload(&path, file.bytes.clone(), content_type).await {
        Ok(url) => {
            info!(url = %url, "Upload successful");
            Some(url)
        }
        Err(e) => {
            warn!(path = %path, error = %e, "Upload failed");
            None
        }
    }
}
