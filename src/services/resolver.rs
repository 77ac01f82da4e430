// src/services/resolver.rs
// DOCUMENTATION: Nearest emergency service resolution
// PURPOSE: Query the place-search provider per category and keep the closest candidate in range

use crate::errors::ProviderError;
use crate::models::{Coordinate, NearestServices, ServiceCategory, ServiceMatch};
use crate::services::geo::distance_between;
use crate::services::nominatim_client::{NominatimPlace, PlaceSearch};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Radius used when the caller does not supply one
pub const DEFAULT_RADIUS_M: u32 = 5000;

/// Candidates requested from the provider per category
pub const MAX_CANDIDATES: u8 = 5;

/// Nearest service resolver
/// DOCUMENTATION: Holds the search provider and the radius that bounds a match
pub struct NearestServiceResolver {
    search: Arc<dyn PlaceSearch>,
    radius_m: u32,
}

impl NearestServiceResolver {
    pub fn new(search: Arc<dyn PlaceSearch>, radius_m: u32) -> Self {
        Self { search, radius_m }
    }

    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Find the nearest service of one category
    /// DOCUMENTATION: Unknown category names resolve to None without contacting the
    /// provider. Provider failures are returned, not retried; an empty result or no
    /// candidate inside the radius is None.
    pub async fn find_nearest(
        &self,
        origin: Coordinate,
        category: &str,
        radius_m: u32,
    ) -> Result<Option<ServiceMatch>, ProviderError> {
        let category = match category.parse::<ServiceCategory>() {
            Ok(category) => category,
            Err(e) => {
                log::debug!("{}", e);
                return Ok(None);
            }
        };

        let query = build_query(origin, category);
        let candidates = self.search.search(&query, MAX_CANDIDATES).await?;

        if candidates.is_empty() {
            log::info!("No {} candidates near {}", category, origin);
            return Ok(None);
        }

        let found = select_nearest(origin, &candidates, radius_m);
        if found.is_none() {
            log::info!(
                "No {} within {} m of {} ({} candidates)",
                category,
                radius_m,
                origin,
                candidates.len()
            );
        }
        Ok(found)
    }

    /// Resolve every category for one coordinate
    /// DOCUMENTATION: Categories run one after another and independently; a category
    /// whose search fails is null in the result. Only when every category fails is the
    /// lookup reported as a provider error, so the caller can retry it.
    pub async fn find_all(&self, origin: Coordinate) -> Result<NearestServices, ProviderError> {
        let mut services = NearestServices::default();
        let mut failures = 0;
        let mut last_error = None;

        for category in ServiceCategory::ALL {
            match self
                .find_nearest(origin, category.as_str(), self.radius_m)
                .await
            {
                Ok(found) => services.set(category, found),
                Err(e) => {
                    log::error!("Error searching {} services near {}: {}", category, origin, e);
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == ServiceCategory::ALL.len() => Err(e),
            _ => Ok(services),
        }
    }
}

/// Natural-language query sent to the provider
pub fn build_query(origin: Coordinate, category: ServiceCategory) -> String {
    format!("{} near {}", category.search_phrase(), origin)
}

/// Pick the closest candidate inside the radius
/// DOCUMENTATION: Candidates are scanned in provider order; a strictly smaller
/// distance replaces the current best, so the first of equal minima wins.
/// Candidates with unparsable coordinates are skipped.
pub fn select_nearest(
    origin: Coordinate,
    candidates: &[NominatimPlace],
    radius_m: u32,
) -> Option<ServiceMatch> {
    let radius_km = f64::from(radius_m) / 1000.0;
    let mut nearest: Option<(f64, &NominatimPlace, Coordinate)> = None;

    for candidate in candidates {
        let Some((lat, lon)) = candidate.coordinates() else {
            log::warn!(
                "Skipping candidate with invalid coordinates: lat={:?} lon={:?}",
                candidate.lat,
                candidate.lon
            );
            continue;
        };

        let location = Coordinate::new(lat, lon);
        let distance = distance_between(origin, location);
        if distance > radius_km {
            continue;
        }

        let closer = nearest
            .as_ref()
            .map_or(true, |(best, _, _)| distance < *best);
        if closer {
            nearest = Some((distance, candidate, location));
        }
    }

    nearest.map(|(distance, candidate, coordinates)| to_service_match(candidate, distance, coordinates))
}

fn to_service_match(candidate: &NominatimPlace, distance: f64, coordinates: Coordinate) -> ServiceMatch {
    let address: BTreeMap<String, String> = candidate
        .address
        .as_ref()
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| (key.clone(), value_to_string(value)))
                .collect()
        })
        .unwrap_or_default();

    let phone = address
        .get("phone")
        .cloned()
        .unwrap_or_else(|| "N/A".to_string());

    ServiceMatch {
        name: candidate
            .display_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        distance,
        coordinates,
        address,
        phone,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{place_north_of, FakeSearch};
    use serde_json::json;

    const ORIGIN: Coordinate = Coordinate {
        latitude: 28.6139,
        longitude: 77.2090,
    };

    fn place_north(name: &str, km: f64) -> NominatimPlace {
        place_north_of(ORIGIN, name, km)
    }

    #[test]
    fn test_selects_closest_in_radius() {
        let candidates = vec![
            place_north("Far", 3.2),
            place_north("Near", 1.1),
            place_north("Farther", 4.0),
        ];

        let found = select_nearest(ORIGIN, &candidates, 5000).unwrap();
        assert_eq!(found.name, "Near");
        assert!((found.distance - 1.1).abs() < 0.02);
    }

    #[test]
    fn test_none_when_all_outside_radius() {
        let candidates = vec![place_north("A", 6.0), place_north("B", 12.5)];
        assert!(select_nearest(ORIGIN, &candidates, 5000).is_none());
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let candidates = vec![place_north("Edge", 2.0)];
        let found = select_nearest(ORIGIN, &candidates, 5000).unwrap();

        let exact = select_nearest(ORIGIN, &candidates, (found.distance * 1000.0).round() as u32);
        assert!(exact.is_some());
    }

    #[test]
    fn test_first_minimum_wins_ties() {
        let mut twin = place_north("Second", 1.0);
        twin.address = Some(json!({ "road": "Other Road" }).as_object().unwrap().clone());
        let candidates = vec![place_north("First", 1.0), twin];

        let found = select_nearest(ORIGIN, &candidates, 5000).unwrap();
        assert_eq!(found.name, "First");
    }

    #[test]
    fn test_fallback_fields() {
        let mut candidate = place_north("ignored", 0.5);
        candidate.display_name = None;

        let found = select_nearest(ORIGIN, &[candidate], 5000).unwrap();
        assert_eq!(found.name, "Unknown");
        assert_eq!(found.phone, "N/A");
        assert!(found.address.is_empty());
    }

    #[test]
    fn test_phone_and_address_from_provider() {
        let mut candidate = place_north("City General Hospital", 0.8);
        candidate.address = Some(
            json!({ "phone": "+91 11 2336 5525", "city": "New Delhi", "house_number": 12 })
                .as_object()
                .unwrap()
                .clone(),
        );

        let found = select_nearest(ORIGIN, &[candidate], 5000).unwrap();
        assert_eq!(found.phone, "+91 11 2336 5525");
        assert_eq!(found.address["city"], "New Delhi");
        assert_eq!(found.address["house_number"], "12");
    }

    #[test]
    fn test_invalid_coordinates_skipped() {
        let mut broken = place_north("Broken", 0.1);
        broken.lat = "n/a".to_string();
        let candidates = vec![broken, place_north("Valid", 2.0)];

        let found = select_nearest(ORIGIN, &candidates, 5000).unwrap();
        assert_eq!(found.name, "Valid");
    }

    #[test]
    fn test_query_format() {
        assert_eq!(
            build_query(Coordinate::new(28.6, 77.2), ServiceCategory::Police),
            "police station near 28.6,77.2"
        );
    }

    #[tokio::test]
    async fn test_unknown_category_skips_provider() {
        let search = FakeSearch::returning(vec![place_north("Zoo", 1.0)]);
        let resolver = NearestServiceResolver::new(search.clone(), DEFAULT_RADIUS_M);

        let found = resolver.find_nearest(ORIGIN, "zoo", DEFAULT_RADIUS_M).await;

        assert!(matches!(found, Ok(None)));
        assert!(search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_known_category_by_name() {
        let search = FakeSearch::returning(vec![place_north("Main Fire Station", 1.0)]);
        let resolver = NearestServiceResolver::new(search.clone(), DEFAULT_RADIUS_M);

        let found = resolver.find_nearest(ORIGIN, "fire", DEFAULT_RADIUS_M).await;

        assert_eq!(found.unwrap().unwrap().name, "Main Fire Station");
        assert_eq!(search.queries(), vec!["fire station near 28.6139,77.209"]);
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned() {
        let resolver = NearestServiceResolver::new(FakeSearch::failing(), DEFAULT_RADIUS_M);
        let found = resolver.find_nearest(ORIGIN, "hospital", DEFAULT_RADIUS_M).await;
        assert!(matches!(found, Err(ProviderError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_empty_results_is_none() {
        let resolver = NearestServiceResolver::new(FakeSearch::returning(Vec::new()), DEFAULT_RADIUS_M);
        let found = resolver.find_nearest(ORIGIN, "police", DEFAULT_RADIUS_M).await;
        assert!(matches!(found, Ok(None)));
    }

    #[tokio::test]
    async fn test_radius_argument_bounds_match() {
        let search = FakeSearch::returning(vec![place_north("Clinic", 3.0)]);
        let resolver = NearestServiceResolver::new(search, DEFAULT_RADIUS_M);

        let within = resolver.find_nearest(ORIGIN, "hospital", 4000).await.unwrap();
        let outside = resolver.find_nearest(ORIGIN, "hospital", 2000).await.unwrap();

        assert!(within.is_some());
        assert!(outside.is_none());
    }

    #[tokio::test]
    async fn test_find_all_queries_every_category() {
        let search = FakeSearch::returning(vec![place_north("Somewhere", 1.5)]);
        let resolver = NearestServiceResolver::new(search.clone(), DEFAULT_RADIUS_M);

        let services = resolver.find_all(ORIGIN).await.unwrap();

        for category in ServiceCategory::ALL {
            assert_eq!(services.get(category).unwrap().name, "Somewhere");
        }
        assert_eq!(
            search.queries(),
            vec![
                "police station near 28.6139,77.209",
                "hospital near 28.6139,77.209",
                "fire station near 28.6139,77.209",
            ]
        );
    }

    #[tokio::test]
    async fn test_find_all_isolates_category_failure() {
        let search = FakeSearch::failing_on("hospital", vec![place_north("Station", 0.7)]);
        let resolver = NearestServiceResolver::new(search, DEFAULT_RADIUS_M);

        let services = resolver.find_all(ORIGIN).await.unwrap();

        assert!(services.police.is_some());
        assert!(services.hospital.is_none());
        assert!(services.fire.is_some());
    }

    #[tokio::test]
    async fn test_find_all_reports_total_outage() {
        let resolver = NearestServiceResolver::new(FakeSearch::failing(), DEFAULT_RADIUS_M);
        assert!(resolver.find_all(ORIGIN).await.is_err());
    }
}
