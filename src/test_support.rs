// src/test_support.rs
// DOCUMENTATION: In-memory providers for unit tests
// PURPOSE: Exercise the resolver and handlers without network access

use crate::errors::ProviderError;
use crate::models::Coordinate;
use crate::services::{NominatimPlace, PlaceSearch, Translator, MAX_CANDIDATES};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Kilometers per degree of latitude on the 6371 km sphere
const KM_PER_DEGREE: f64 = 111.195;

/// Candidate due north of `origin` at roughly `km` kilometers
pub fn place_north_of(origin: Coordinate, name: &str, km: f64) -> NominatimPlace {
    NominatimPlace {
        lat: (origin.latitude + km / KM_PER_DEGREE).to_string(),
        lon: origin.longitude.to_string(),
        display_name: Some(name.to_string()),
        address: None,
    }
}

fn unavailable() -> ProviderError {
    ProviderError::Status {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

/// Canned place search recording every query it receives
pub struct FakeSearch {
    results: Vec<NominatimPlace>,
    /// Queries containing this phrase fail; "" fails everything
    fail_on: Option<&'static str>,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn returning(results: Vec<NominatimPlace>) -> Arc<Self> {
        Arc::new(Self {
            results,
            fail_on: None,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_on(phrase: &'static str, results: Vec<NominatimPlace>) -> Arc<Self> {
        Arc::new(Self {
            results,
            fail_on: Some(phrase),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Self::failing_on("", Vec::new())
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for FakeSearch {
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<NominatimPlace>, ProviderError> {
        assert_eq!(limit, MAX_CANDIDATES);
        self.queries.lock().unwrap().push(query.to_string());
        match self.fail_on {
            Some(phrase) if query.contains(phrase) => Err(unavailable()),
            _ => Ok(self.results.clone()),
        }
    }
}

/// Translator that fails a fixed number of times before answering
pub struct FakeTranslator {
    failures_before_success: u32,
    detected: &'static str,
    calls: AtomicU32,
}

impl FakeTranslator {
    /// Answers on the first call
    pub fn working(detected: &'static str) -> Arc<Self> {
        Self::flaky(0, detected)
    }

    /// Fails `failures` times, then answers
    pub fn flaky(failures: u32, detected: &'static str) -> Arc<Self> {
        Arc::new(Self {
            failures_before_success: failures,
            detected,
            calls: AtomicU32::new(0),
        })
    }

    /// Never answers
    pub fn broken() -> Arc<Self> {
        Self::flaky(u32::MAX, "")
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<(), ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures_before_success {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        self.attempt()?;
        Ok(format!("[{}] {}", target, text))
    }

    async fn detect_language(&self, _text: &str) -> Result<String, ProviderError> {
        self.attempt()?;
        Ok(self.detected.to_string())
    }
}
