use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::image::{Image, ImageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxImageRepo,
};

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn list_images(&self) -> Result<Vec<Image>, AppError>;
    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError>;
}

impl SqlxImageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        let images = sqlx::query_as::<_, Image>(
            r#"SELECT id, url, created_at FROM images ORDER BY created_at DESC, id DESC"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError> {
        let created = sqlx::query_as::<_, Image>(
            r#"
            INSERT INTO images (url)
            VALUES ($1)
            RETURNING id, url, created_at
            "#
        )
        .bind(&image.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}

#[async_trait]
impl<R> ImageRepository for Arc<R>
where
    R: ImageRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        (**self).list_images().await
    }

    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError> {
        (**self).create_image(image).await
    }
}
