// src/handlers/translation.rs
// DOCUMENTATION: HTTP handlers for translation and language detection
// PURPOSE: Validate requests, call the translation provider with retries, return results

use crate::errors::AppError;
use crate::handlers::method_not_allowed;
use crate::models::{DetectLanguageRequest, DetectionResult, TranslateRequest, TranslationResult};
use crate::services::AUTO_SOURCE;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /translate
/// Translate text into the requested language (default "en")
pub async fn translate_text(
    state: web::Data<AppState>,
    req: web::Json<TranslateRequest>,
) -> Result<impl Responder, AppError> {
    req.validate()?;

    let text = req.trimmed_text();
    let target_language = req.target_language();
    let translator = &state.translator;

    let translated_text = state
        .retry
        .retry("translate_text", || {
            translator.translate(&text, AUTO_SOURCE, &target_language)
        })
        .await
        .map_err(|e| AppError::TranslationFailed(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TranslationResult {
        original_text: text,
        translated_text,
        target_language,
    }))
}

/// POST /detect-language
/// Detect the language of the given text
pub async fn detect_language(
    state: web::Data<AppState>,
    req: web::Json<DetectLanguageRequest>,
) -> Result<impl Responder, AppError> {
    req.validate()?;

    let text = req.trimmed_text();
    let translator = &state.translator;

    let detected_language = state
        .retry
        .retry("detect_language", || translator.detect_language(&text))
        .await
        .map_err(|e| AppError::DetectionFailed(e.to_string()))?;

    Ok(HttpResponse::Ok().json(DetectionResult {
        text,
        detected_language,
    }))
}

/// Configuration for translation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/translate")
            .route(web::post().to(translate_text))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/detect-language")
            .route(web::post().to(detect_language))
            .default_service(web::to(method_not_allowed)),
    );
}
