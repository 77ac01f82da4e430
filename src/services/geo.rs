// src/services/geo.rs
// DOCUMENTATION: Great-circle distance between coordinates
// PURPOSE: Haversine formula used to rank emergency services by proximity

use crate::models::Coordinate;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two coordinates in kilometers
/// DOCUMENTATION: Haversine formula, rounded to 2 decimal places.
/// Inputs are not range-checked; callers pass validated coordinates.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_to_hundredths(EARTH_RADIUS_KM * c)
}

/// Distance between two coordinates in kilometers
pub fn distance_between(from: Coordinate, to: Coordinate) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
