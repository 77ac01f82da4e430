// src/services/nominatim_client.rs
// DOCUMENTATION: OpenStreetMap Nominatim API client
// PURPOSE: Free-text place search used to locate emergency services

use crate::errors::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Place-search provider interface
/// DOCUMENTATION: Seam between the nearest-service resolver and the HTTP client,
/// so the resolver can be exercised against canned candidates
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Search places matching a free-text query, returning at most `limit` candidates
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<NominatimPlace>, ProviderError>;
}

/// Individual search candidate from Nominatim
/// DOCUMENTATION: Nominatim encodes coordinates as strings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NominatimPlace {
    /// Latitude in decimal degrees (string-encoded)
    #[serde(default)]
    pub lat: String,
    /// Longitude in decimal degrees (string-encoded)
    #[serde(default)]
    pub lon: String,
    /// Full human-readable name
    pub display_name: Option<String>,
    /// Address breakdown (present when addressdetails=1)
    pub address: Option<Map<String, Value>>,
}

impl NominatimPlace {
    /// Parsed (latitude, longitude), if both are valid numbers
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

/// Nominatim API client
/// DOCUMENTATION: Sends the identifying User-Agent required by the usage policy
pub struct NominatimClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL for the Nominatim API
    base_url: String,
}

impl NominatimClient {
    /// Create new Nominatim client
    /// DOCUMENTATION: `user_agent` is attached to every request
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the search request
    /// DOCUMENTATION: The query string is form-encoded (spaces as `+`, commas as `%2C`)
    fn search_request(&self, query: &str, limit: u8) -> Result<reqwest::Request, ProviderError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let params = [
            ("q", query),
            ("format", "json"),
            ("limit", limit.as_str()),
            ("addressdetails", "1"),
        ];

        Ok(self.client.get(&url).query(&params).build()?)
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    /// Perform free-text search
    /// DOCUMENTATION: GET /search?q=...&format=json&limit=N&addressdetails=1
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<NominatimPlace>, ProviderError> {
        let request = self.search_request(query, limit)?;

        log::debug!("Nominatim search: {}", request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            log::error!("Nominatim request failed: {}", e);
            ProviderError::Request(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Nominatim API error {}: {}", status, body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            log::error!("Failed to parse Nominatim response: {}", e);
            ProviderError::Parse(e.to_string())
        })?;

        log::info!("Nominatim search returned {} results", places.len());
        Ok(places)
    }
}
