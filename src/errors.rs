use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    PayloadTooLarge(String),
    Database(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "{}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::InternalError(msg) => write!(f, "{}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": self.to_string(),
                    "details": errors
                })
            }
            // Driver details stay in the logs.
            AppError::Database(msg) => {
                tracing::error!("Unhandled database error: {}", msg);
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<DataUrlError> for AppError {
    fn from(err: DataUrlError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    #[display("Data URL must start with \"data:\"")]
    MissingScheme,

    #[display("Data URL is missing the ',' separator")]
    MissingSeparator,

    #[display("Data URL must be base64 encoded")]
    NotBase64,

    #[display("Data URL must carry an image MIME type, got \"{_0}\"")]
    NotAnImage(String),

    #[display("Data URL payload is empty")]
    EmptyPayload,

    #[display("Data URL payload is not valid base64")]
    InvalidEncoding,

    #[display("Data URL declares {declared} but contains {detected}")]
    ContentMismatch { declared: String, detected: String },
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
