use actix_web::web;

mod images;
mod json_error;
mod system;

/// Registers every route; `json_limit` bounds request bodies in bytes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.configure(system::config_routes);

    cfg.service(
        web::scope("/api")
            .configure(images::config_routes)
    );

    json_error::config_routes(cfg, json_limit);
}
