// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures talking to an outbound provider (translation or place search)
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and a client-facing message.
/// Server-side variants carry internal detail that is logged but never returned.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found")]
    NotFound,

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Language detection failed: {0}")]
    DetectionFailed(String),

    #[error("Nearest service lookup failed: {0}")]
    LookupFailed(String),

    #[error("Home page unavailable: {0}")]
    PageUnavailable(String),
}

impl AppError {
    /// Message placed in the `error` field of the response body
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::ValidationError(msg) => msg.clone(),
            AppError::NotFound => "Not found".to_string(),
            AppError::TranslationFailed(_) => "Translation service error".to_string(),
            AppError::DetectionFailed(_) => "Language detection service error".to_string(),
            AppError::LookupFailed(_) => "Failed to find nearest services".to_string(),
            AppError::PageUnavailable(_) => "Error loading page".to_string(),
        }
    }
}

/// Convert DTO validation failures into a 400 carrying the first rule's message
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let message = fields
            .iter()
            .flat_map(|(field, errs)| errs.iter().map(move |err| (*field, err)))
            .next()
            .map(|(field, err)| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            })
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::ValidationError(message)
    }
}

/// Convert AppError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and `{"error": ...}` bodies
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(status).json(json!({ "error": self.client_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::TranslationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DetectionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::LookupFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
