//! Coordinates and distances
//!
//! This module handles:
//! - The lat/lng pair shared by every other module
//! - Great-circle distance and mile formatting
//! - Bounding boxes for fitting a map viewport

pub mod distance;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// "lat,lng" as the Google APIs expect it
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Axis-aligned box containing a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Box around a single point
    pub fn from_point(point: Coordinates) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: Coordinates) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Smallest box containing every point, or None for an empty iterator
    pub fn containing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Whether `point` lies inside the box (edges included)
    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}
