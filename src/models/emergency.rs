// src/models/emergency.rs
// DOCUMENTATION: Data structures for the nearest emergency service lookup
// PURPOSE: Request DTO, service categories and lookup results

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Kind of emergency service
/// DOCUMENTATION: Closed set; each category maps to a free-text search phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Police,
    Hospital,
    Fire,
}

impl ServiceCategory {
    /// All categories, in response order
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Police,
        ServiceCategory::Hospital,
        ServiceCategory::Fire,
    ];

    /// Phrase sent to the place-search provider
    pub fn search_phrase(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "police station",
            ServiceCategory::Hospital => "hospital",
            ServiceCategory::Fire => "fire station",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "police",
            ServiceCategory::Hospital => "hospital",
            ServiceCategory::Fire => "fire",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "police" => Ok(ServiceCategory::Police),
            "hospital" => Ok(ServiceCategory::Hospital),
            "fire" => Ok(ServiceCategory::Fire),
            other => Err(format!("Unknown service category: {}", other)),
        }
    }
}

/// Nearest service found for one category
/// DOCUMENTATION: Built fresh per request from the winning search candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceMatch {
    /// Provider display name ("Unknown" when absent)
    pub name: String,

    /// Distance from the caller in kilometers, rounded to 2 decimals
    pub distance: f64,

    /// Location of the service
    pub coordinates: Coordinate,

    /// Structured address as returned by the provider (may be empty)
    pub address: BTreeMap<String, String>,

    /// Contact phone ("N/A" when absent)
    pub phone: String,
}

/// Response body for POST /api/emergency/nearest
/// DOCUMENTATION: Exactly one key per category; a category with no match serializes as null
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NearestServices {
    pub police: Option<ServiceMatch>,
    pub hospital: Option<ServiceMatch>,
    pub fire: Option<ServiceMatch>,
}

impl NearestServices {
    pub fn set(&mut self, category: ServiceCategory, found: Option<ServiceMatch>) {
        match category {
            ServiceCategory::Police => self.police = found,
            ServiceCategory::Hospital => self.hospital = found,
            ServiceCategory::Fire => self.fire = found,
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: ServiceCategory) -> Option<&ServiceMatch> {
        match category {
            ServiceCategory::Police => self.police.as_ref(),
            ServiceCategory::Hospital => self.hospital.as_ref(),
            ServiceCategory::Fire => self.fire.as_ref(),
        }
    }
}

/// Request body for POST /api/emergency/nearest
/// DOCUMENTATION: Coordinates may arrive as JSON numbers or numeric strings
#[derive(Debug, Deserialize, Validate)]
pub struct NearestServicesRequest {
    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[validate(
        required(message = "Location coordinates required"),
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[validate(
        required(message = "Location coordinates required"),
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
}

impl NearestServicesRequest {
    /// Coordinate of a validated request
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(value)) => value,
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("Invalid coordinate: {}", text)))?,
    };

    if !value.is_finite() {
        return Err(de::Error::custom("Coordinates must be finite numbers"));
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_round_trip_names() {
        for category in ServiceCategory::ALL {
            assert_eq!(category.as_str().parse::<ServiceCategory>(), Ok(category));
        }
        assert!("zoo".parse::<ServiceCategory>().is_err());
        assert_eq!(ServiceCategory::Fire.search_phrase(), "fire station");
    }

    #[test]
    fn test_request_accepts_numeric_strings() {
        let req: NearestServicesRequest =
            serde_json::from_value(json!({ "latitude": "28.6", "longitude": 77.2 })).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.coordinate(), Some(Coordinate::new(28.6, 77.2)));
    }

    #[test]
    fn test_request_missing_and_out_of_range() {
        let missing: NearestServicesRequest =
            serde_json::from_value(json!({ "latitude": 28.6 })).unwrap();
        assert!(missing.validate().is_err());
        assert_eq!(missing.coordinate(), None);

        let out_of_range: NearestServicesRequest =
            serde_json::from_value(json!({ "latitude": 123.0, "longitude": 0.0 })).unwrap();
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_request_rejects_garbage() {
        let result = serde_json::from_value::<NearestServicesRequest>(
            json!({ "latitude": "north", "longitude": 0.0 }),
        );
        assert!(result.is_err());

        let result = serde_json::from_value::<NearestServicesRequest>(
            json!({ "latitude": "NaN", "longitude": 0.0 }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_nearest_services_serializes_all_keys() {
        let value = serde_json::to_value(NearestServices::default()).unwrap();
        assert_eq!(value, json!({ "police": null, "hospital": null, "fire": null }));
    }
}
