//! Great-circle distance and mile formatting

use crate::constants::geo::{EARTH_RADIUS_METERS, METERS_PER_MILE};
use crate::coord::Coordinates;
use std::f64::consts::PI;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Distance from `origin` to `target`, or zero when the target has no geometry
pub fn distance_or_zero(origin: Coordinates, target: Option<Coordinates>) -> f64 {
    haversine_distance(origin, target.unwrap_or(origin))
}

/// Convert meters to statute miles
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Render a distance as "N.N miles"
pub fn format_miles(meters: f64) -> String {
    format!("{:.1} miles", meters_to_miles(meters))
}

/// Read the number back out of a "N.N miles" string
///
/// Anything unparseable reads as zero.
pub fn parse_miles(formatted: &str) -> f64 {
    formatted
        .split(' ')
        .next()
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
