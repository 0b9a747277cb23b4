// Point model representing a race circuit on the globe

use crate::utils::distance::haversine_km;
use crate::utils::lookup::normalize_name;
use crate::{Result, RouteError};

/// A named location. Longitude is stored as `x`, latitude as `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Display name, also the lookup key (trimmed, case-insensitive)
    pub name: String,

    /// Geographic position in degrees
    pub location: geo::Point<f64>,
}

impl Point {
    /// Creates a point, rejecting coordinates outside the valid ranges
    pub fn new<S: Into<String>>(name: S, latitude: f64, longitude: f64) -> Result<Self> {
        let name = name.into();
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RouteError::invalid_argument(format!(
                "latitude of {name} out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RouteError::invalid_argument(format!(
                "longitude of {name} out of range: {longitude}"
            )));
        }
        Ok(Self {
            name,
            location: geo::Point::new(longitude, latitude),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    /// Lookup key: trimmed and lower-cased name
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Great-circle distance in kilometres
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_km(&self.location, &other.location)
    }
}
