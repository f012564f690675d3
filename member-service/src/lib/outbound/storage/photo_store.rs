use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::StorageConfig;
use crate::domain::member::models::PhotoUpload;
use crate::member::errors::PhotoStoreError;
use crate::member::ports::PhotoStore;
use crate::member::ports::StoredPhoto;

/// HTTP client for the external photo blob storage service.
///
/// Uploads go up as multipart form data; the storage answers with the public
/// URL and its own object reference, which is kept on the photo for later
/// deletion.
pub struct HttpPhotoStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

impl HttpPhotoStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl PhotoStore for HttpPhotoStore {
    async fn upload(&self, upload: PhotoUpload) -> Result<StoredPhoto, PhotoStoreError> {
        let part = Part::bytes(upload.bytes).file_name(upload.filename);
        let part = match upload.content_type {
            Some(content_type) => part
                .mime_str(&content_type)
                .map_err(|e| PhotoStoreError::Upload(e.to_string()))?,
            None => part,
        };
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/photos", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PhotoStoreError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PhotoStoreError::Upload(error_detail(response).await));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PhotoStoreError::Upload(e.to_string()))?;

        Ok(StoredPhoto {
            url: body.url,
            external_id: body.public_id,
        })
    }

    async fn delete(&self, external_id: &str) -> Result<(), PhotoStoreError> {
        let response = self
            .client
            .delete(format!("{}/photos/{}", self.base_url, external_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| PhotoStoreError::Delete(e.to_string()))?;

        // An object that is already gone counts as deleted; a retried gallery
        // deletion converges instead of failing forever
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }

        Err(PhotoStoreError::Delete(error_detail(response).await))
    }
}

async fn error_detail(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => format!("{}: {}", status, body),
        _ => status.to_string(),
    }
}
