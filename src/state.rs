// src/state.rs
// DOCUMENTATION: Shared application state
// PURPOSE: Provider clients and policies built once at startup and handed to every worker

use crate::config::Config;
use crate::errors::ProviderError;
use crate::services::{
    GoogleTranslateClient, NearestServiceResolver, NominatimClient, RetryPolicy, Translator,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only state shared by all handlers
pub struct AppState {
    /// Translation and language detection provider
    pub translator: Arc<dyn Translator>,
    /// Nearest emergency service lookup
    pub resolver: NearestServiceResolver,
    /// Retry policy applied to provider calls
    pub retry: RetryPolicy,
    /// Directory holding index.html
    pub templates_dir: PathBuf,
}

impl AppState {
    /// Build the production state from configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let timeout = config.request_timeout();

        let translator =
            GoogleTranslateClient::new(&config.translate_url, &config.user_agent, timeout)?;
        let search = NominatimClient::new(&config.nominatim_url, &config.user_agent, timeout)?;

        Ok(Self {
            translator: Arc::new(translator),
            resolver: NearestServiceResolver::new(Arc::new(search), config.search_radius_m),
            retry: RetryPolicy::new(config.retry_max_attempts, config.retry_delay()),
            templates_dir: PathBuf::from(&config.templates_dir),
        })
    }
}
