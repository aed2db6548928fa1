use actix_cors::Cors;
use actix_web::http::{header, Method};

const MAX_AGE_SECS: usize = 3600;

/// Builds the CORS policy for the configured origins; `*` allows any origin.
pub fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(MAX_AGE_SECS);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
