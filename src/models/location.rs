//! Location model for named points of interest

use serde::{Deserialize, Serialize};

/// A named monitoring station or city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Display name (station, city, etc.)
    pub name: String,
    /// Region or country the location belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            region: None,
            latitude,
            longitude,
        }
    }

    /// Create location with region
    #[must_use]
    pub fn with_region(
        name: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            region: Some(region.into()),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Name followed by region when one is known
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.region {
            Some(region) => format!("{}, {}", self.name, region),
            None => self.name.clone(),
        }
    }

    /// Case-insensitive substring match against name and region.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .region
                .as_deref()
                .is_some_and(|region| region.to_lowercase().contains(needle))
    }

    /// Both coordinates are finite and inside the WGS84 ranges
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
