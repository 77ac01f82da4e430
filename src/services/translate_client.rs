// src/services/translate_client.rs
// DOCUMENTATION: Google Translate web endpoint client
// PURPOSE: Translate text and detect its language through an external provider

use crate::errors::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Source language sentinel asking the provider to auto-detect
pub const AUTO_SOURCE: &str = "auto";

/// Translation provider interface
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from `source` (or "auto") into `target`
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, ProviderError>;

    /// Detect language of text, returning its language code
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError>;
}

/// Output of one provider round-trip
#[derive(Debug, Clone, PartialEq)]
pub struct GtxTranslation {
    pub text: String,
    pub detected_source: Option<String>,
}

/// Google Translate client
/// DOCUMENTATION: Uses the keyless `client=gtx` endpoint
pub struct GoogleTranslateClient {
    /// HTTP client for making requests
    client: Client,
    /// Endpoint URL (translate_a/single)
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Single request against the endpoint
    async fn request(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<GtxTranslation, ProviderError> {
        let params = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];

        log::debug!("Translating {} chars from {} to {}", text.len(), source, target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Translation request failed: {}", e);
                ProviderError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("Translation API error {}: {}", status, body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            log::error!("Failed to parse translation response: {}", e);
            ProviderError::Parse(e.to_string())
        })?;

        parse_gtx_response(&json)
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let translation = self.request(text, source, target).await?;
        Ok(translation.text)
    }

    async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
        let translation = self.request(text, AUTO_SOURCE, "en").await?;
        translation.detected_source.ok_or_else(|| {
            ProviderError::Parse("Response did not include a detected language".to_string())
        })
    }
}

/// Extract translation and detected language from a gtx response
/// DOCUMENTATION: Segments live at [0][*][0] and are concatenated;
/// the detected source language is at [2]
pub fn parse_gtx_response(json: &Value) -> Result<GtxTranslation, ProviderError> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Parse("Missing segment array".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let detected_source = json
        .get(2)
        .and_then(Value::as_str)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    Ok(GtxTranslation {
        text,
        detected_source,
    })
}
