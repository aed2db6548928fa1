use validator::Validate;

use crate::{
    entities::image::{max_url_len, ImageCreatedResponse, ImageInsert, ImageListResponse, NewImageRequest},
    errors::AppError,
    repositories::image::ImageRepository,
};

pub struct ImageHandler<R>
where
    R: ImageRepository,
{
    pub image_repo: R,
    pub max_upload_bytes: usize,
}

impl<R> ImageHandler<R>
where
    R: ImageRepository,
{
    pub fn new(image_repo: R, max_upload_bytes: usize) -> Self {
        ImageHandler { image_repo, max_upload_bytes }
    }

    /// Lists every stored image, newest first
    pub async fn list_images(&self) -> Result<ImageListResponse, AppError> {
        let images = self.image_repo.list_images().await.map_err(|e| {
            tracing::error!("GET /api/images failed: {}", e);
            AppError::InternalError("Failed to fetch images".to_string())
        })?;

        Ok(ImageListResponse { images })
    }

    /// Validates and stores a new image reference
    pub async fn create_image(&self, request: NewImageRequest) -> Result<ImageCreatedResponse, AppError> {
        let insert = ImageInsert::try_from(request)?;

        if insert.url.len() > max_url_len(self.max_upload_bytes) {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        insert.validate()?;

        let image = self.image_repo.create_image(&insert).await.map_err(|e| {
            tracing::error!("POST /api/images failed: {}", e);
            AppError::InternalError("Failed to save image".to_string())
        })?;

        tracing::info!(image_id = %image.id, url_len = image.url.len(), "Image stored");
        Ok(ImageCreatedResponse { image })
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.image_repo.check_connection().await
    }
}
