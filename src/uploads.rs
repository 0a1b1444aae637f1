use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::info;

use crate::collections::dto::Envelope;
use crate::error::AppError;

/// A binary file selected in the admin form (course image, testimonial
/// avatar).
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Stores a file and returns the filename to reference from records.
#[async_trait]
pub trait AttachmentUploader: Send + Sync {
    async fn upload(&self, attachment: Attachment) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(alias = "file", alias = "path")]
    filename: String,
}

/// Posts attachments as `multipart/form-data` (field `image`) to a file
/// server.
pub struct HttpUploader {
    client: Client,
    url: String,
}

impl HttpUploader {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl AttachmentUploader for HttpUploader {
    async fn upload(&self, attachment: Attachment) -> Result<String, AppError> {
        let size = attachment.bytes.len();
        let mut part = Part::bytes(attachment.bytes).file_name(attachment.filename.clone());
        if let Some(content_type) = &attachment.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::Upload(format!("Invalid content type: {}", e)))?;
        }
        let form = Form::new().part("image", part);

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Upload(format!("{} {}", status, body)));
        }

        let filename = if let Ok(response) = serde_json::from_str::<UploadResponse>(&body) {
            response.filename
        } else if let Ok(envelope) = serde_json::from_str::<Envelope<UploadResponse>>(&body) {
            envelope
                .into_inner()
                .map_err(|e| AppError::Upload(e.to_string()))?
                .filename
        } else {
            body.trim().trim_matches('"').to_string()
        };

        if filename.is_empty() {
            return Err(AppError::Upload("File server returned no filename".to_string()));
        }

        info!("Uploaded {} ({} bytes) as {}", attachment.filename, size, filename);
        Ok(filename)
    }
}

/// Used when no file server is configured.
pub struct DisabledUploader;

#[async_trait]
impl AttachmentUploader for DisabledUploader {
    async fn upload(&self, attachment: Attachment) -> Result<String, AppError> {
        Err(AppError::Config(format!(
            "UPLOAD_URL is not set, cannot upload {}",
            attachment.filename
        )))
    }
}
