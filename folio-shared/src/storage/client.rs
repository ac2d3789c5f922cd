/// Object storage client
///
/// Assets are stored in a single bucket of a Supabase Storage compatible
/// service, addressed by `{subfolder}/{file}` paths. Objects are public; the
/// URL returned after an upload is what the content tables store.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Error type for object storage calls
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage service could not be reached
    #[error("Storage service unreachable: {0}")]
    Transport(String),

    /// The storage service refused the upload
    #[error("Upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Somewhere binary assets can be uploaded and served publicly from
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `bytes` under `path` and returns the object's public URL
    ///
    /// Existing objects are never overwritten.
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Supabase Storage REST client
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseStorage {
    /// Client for `bucket` in the project at `base_url`, sharing `http`'s connection pool
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }

    /// Public URL of the object at `path`
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        debug!(path, content_type, size = bytes.len(), "Uploading object");

        let response = self
            .http
            .post(self.object_url(path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(self.public_url(path))
    }
}
