use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::JsonPayloadError,
};
use serde_json::json;


pub fn config_routes(cfg: &mut web::ServiceConfig, limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(limit)
            .content_type_required(false)
            .error_handler(|err, _req| {
                tracing::debug!("Rejected JSON body: {}", err);
                JsonError::from(err).into()
            })
    );
}

#[derive(Debug)]
pub struct JsonError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => JsonError {
                message: "Request body is too large".to_string(),
                status: StatusCode::PAYLOAD_TOO_LARGE,
            },
            _ => JsonError {
                message: format!("Invalid JSON body: {}", err),
                status: StatusCode::BAD_REQUEST,
            },
        }
    }
}
