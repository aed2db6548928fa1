use async_trait::async_trait;
use derive_more::Display;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::entities::image::{Image, ImageCreatedResponse, ImageListResponse, NewImageRequest};

pub const LIST_FALLBACK_ERROR: &str = "Failed to load images";
pub const UPLOAD_FALLBACK_ERROR: &str = "Upload failed";

/// A failed API call, carrying the text the modal shows inline.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    fn new(message: impl Into<String>) -> Self {
        ClientError { message: message.into() }
    }
}

#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn list_images(&self) -> Result<Vec<Image>, ClientError>;
    async fn create_image(&self, url: &str) -> Result<Image, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct ImageApiClient {
    http: Client,
    base_url: String,
}

impl ImageApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ImageApiClient { http, base_url }
    }

    fn images_url(&self) -> String {
        format!("{}/api/images", self.base_url)
    }
}

/// Pulls the server's `error` field, or falls back when there is none.
async fn error_from_response(response: Response, fallback: &str) -> ClientError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::debug!(%status, "Image API returned an error: {}", message);
    ClientError::new(message)
}

#[async_trait]
impl ImageApi for ImageApiClient {
    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        let response = self.http
            .get(self.images_url())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("GET /api/images transport error: {}", e);
                ClientError::new(LIST_FALLBACK_ERROR)
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, LIST_FALLBACK_ERROR).await);
        }

        let body: ImageListResponse = response
            .json()
            .await
            .map_err(|_| ClientError::new(LIST_FALLBACK_ERROR))?;

        Ok(body.images)
    }

    async fn create_image(&self, url: &str) -> Result<Image, ClientError> {
        let response = self.http
            .post(self.images_url())
            .json(&NewImageRequest::new(url))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("POST /api/images transport error: {}", e);
                ClientError::new(UPLOAD_FALLBACK_ERROR)
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, UPLOAD_FALLBACK_ERROR).await);
        }

        let body: ImageCreatedResponse = response
            .json()
            .await
            .map_err(|_| ClientError::new(UPLOAD_FALLBACK_ERROR))?;

        Ok(body.image)
    }
}
