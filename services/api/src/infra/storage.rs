use anyhow::Context as _;
use uuid::Uuid;

use crate::error::ApiError;

/// Allowed upload kinds with their own type and size limits.
#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    ProfilePhoto,
    Portfolio,
}

impl UploadKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::ProfilePhoto => "profile-photos",
            Self::Portfolio => "portfolios",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::ProfilePhoto => 5 * 1024 * 1024,
            Self::Portfolio => 50 * 1024 * 1024,
        }
    }

    /// Map an accepted content type to a file extension; `None` means the
    /// type is rejected.
    pub fn extension_for(self, content_type: &str) -> Option<&'static str> {
        match (self, content_type) {
            (_, "image/jpeg") => Some("jpg"),
            (_, "image/png") => Some("png"),
            (_, "image/webp") => Some("webp"),
            (Self::Portfolio, "video/mp4") => Some("mp4"),
            (Self::Portfolio, "video/quicktime") => Some("mov"),
            (Self::Portfolio, "application/pdf") => Some("pdf"),
            _ => None,
        }
    }
}

/// HTTP client for the object storage API.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(base_url: String, key: String, bucket: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            key,
            bucket,
        }
    }

    /// Validate and store an object; returns its public URL. The key is
    /// `{prefix}/{user_id}/{uuid}.{ext}` so nothing user-supplied reaches
    /// the path.
    pub async fn upload(
        &self,
        kind: UploadKind,
        user_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let ext = kind
            .extension_for(content_type)
            .ok_or(ApiError::UnsupportedFileType)?;
        if bytes.len() > kind.max_bytes() {
            return Err(ApiError::FileTooLarge);
        }

        let key = format!("{}/{}/{}.{}", kind.prefix(), user_id, Uuid::new_v4(), ext);
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .context("upload object")?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(ApiError::Internal(anyhow::anyhow!(
                "object storage returned {status}"
            )));
        }

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        ))
    }
}
