use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::image::NewImageRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_images(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.image_handler.list_images().await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, data))]
pub async fn create_image(
    state: web::Data<AppState>,
    data: web::Json<NewImageRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.image_handler
        .create_image(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}
