// src/models/translation.rs
// DOCUMENTATION: Data structures for translation and language detection
// PURPOSE: Request DTOs with validation rules and the response bodies

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Target language used when the request does not name one
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Request body for POST /translate
#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    /// Text to translate (required, must not be blank)
    #[validate(required(message = "No text provided"), custom = "not_blank")]
    pub text: Option<String>,

    /// Target language code (defaults to "en")
    pub target_lang: Option<String>,
}

impl TranslateRequest {
    /// Text with surrounding whitespace removed
    pub fn trimmed_text(&self) -> String {
        self.text.as_deref().unwrap_or_default().trim().to_string()
    }

    /// Requested target language, falling back to the default when absent or blank
    pub fn target_language(&self) -> String {
        self.target_lang
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE)
            .to_string()
    }
}

/// Request body for POST /detect-language
#[derive(Debug, Deserialize, Validate)]
pub struct DetectLanguageRequest {
    #[validate(required(message = "No text provided"), custom = "not_blank")]
    pub text: Option<String>,
}

impl DetectLanguageRequest {
    pub fn trimmed_text(&self) -> String {
        self.text.as_deref().unwrap_or_default().trim().to_string()
    }
}

/// Response body for POST /translate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
}

/// Response body for POST /detect-language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub text: String,
    pub detected_language: String,
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("Empty text provided"));
        return Err(error);
    }
    Ok(())
}
