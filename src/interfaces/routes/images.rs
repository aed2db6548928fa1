use actix_web::web;

use crate::handlers::images;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/images")
            .route(web::get().to(images::list_images))
            .route(web::post().to(images::create_image))
    );
}
