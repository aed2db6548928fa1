use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{entities::data_url::DataUrl, errors::AppError};

// ───── Database Models ───────────────────────────────────────────────

/// A stored image reference. `url` is either an external link or a
/// base64 data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: Uuid,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Validate)]
pub struct ImageInsert {
    #[validate(
        length(min = 1, message = "url is required"),
        custom(function = "validate_image_url")
    )]
    pub url: String,
}

// ───── API Request Models ───────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewImageRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl NewImageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        NewImageRequest { url: Some(url.into()) }
    }
}

impl TryFrom<NewImageRequest> for ImageInsert {
    type Error = AppError;

    fn try_from(request: NewImageRequest) -> Result<Self, Self::Error> {
        let url = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::InvalidInput("url is required".to_string()))?;

        Ok(ImageInsert { url: url.to_string() })
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub images: Vec<Image>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageCreatedResponse {
    pub image: Image,
}

// ───── Validation ───────────────────────────────────────────────────

/// External links pass through untouched; inline data URLs must decode to an image.
pub fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    if !DataUrl::is_data_url(url) {
        return Ok(());
    }

    DataUrl::parse(url).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("invalid_data_url");
        error.message = Some(e.to_string().into());
        error
    })
}

/// Longest `url` accepted for an image of `max_bytes` raw bytes once base64 encoded.
pub fn max_url_len(max_bytes: usize) -> usize {
    const HEADER_SLACK: usize = 256;
    max_bytes.div_ceil(3) * 4 + HEADER_SLACK
}
