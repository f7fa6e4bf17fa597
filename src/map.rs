//! Map marker projection and location details
//!
//! The map is a static illustration, not a tile map: a location is projected
//! equirectangularly onto a fixed 400x300 viewbox and drawn as a marker in the
//! color of its severity tier.

use serde::Serialize;

use crate::models::{AqiSnapshot, Pollutant};
use crate::severity::SeverityTier;

pub const VIEWBOX_WIDTH: f64 = 400.0;
pub const VIEWBOX_HEIGHT: f64 = 300.0;

/// Pollutants listed on the details card
pub const KEY_POLLUTANTS: [Pollutant; 4] =
    [Pollutant::Pm25, Pollutant::Pm10, Pollutant::No2, Pollutant::O3];

/// Marker drawn on the illustrative map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub aqi: u32,
    pub tier: SeverityTier,
    pub color: &'static str,
    /// Viewbox x coordinate, 0 at the left edge
    pub x: f64,
    /// Viewbox y coordinate, 0 at the top edge
    pub y: f64,
    /// "lat°, lng°" caption
    pub caption: String,
}

/// Details card shown next to the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetails {
    pub city: String,
    pub coordinates: String,
    pub status: &'static str,
    pub color: &'static str,
    pub key_pollutants: Vec<(&'static str, String)>,
}

/// Project a coordinate pair onto the viewbox, clamping to its edges
#[must_use]
pub fn project(latitude: f64, longitude: f64) -> (f64, f64) {
    let lat = if latitude.is_finite() { latitude.clamp(-90.0, 90.0) } else { 0.0 };
    let lng = if longitude.is_finite() { longitude.clamp(-180.0, 180.0) } else { 0.0 };

    let x = (lng + 180.0) / 360.0 * VIEWBOX_WIDTH;
    let y = (90.0 - lat) / 180.0 * VIEWBOX_HEIGHT;
    (x, y)
}

/// Marker for the current snapshot
#[must_use]
pub fn marker(snapshot: &AqiSnapshot) -> MapMarker {
    let location = &snapshot.location;
    let tier = snapshot.tier();
    let (x, y) = project(location.latitude, location.longitude);

    MapMarker {
        name: location.name.clone(),
        aqi: snapshot.current_aqi,
        tier,
        color: tier.hex_color(),
        x,
        y,
        caption: format!("{:.4}°, {:.4}°", location.latitude, location.longitude),
    }
}

/// Details card for the current snapshot
#[must_use]
pub fn details(snapshot: &AqiSnapshot) -> LocationDetails {
    let tier = snapshot.tier();
    LocationDetails {
        city: snapshot.location.name.clone(),
        coordinates: snapshot.location.format_coordinates(),
        status: tier.style().short_label,
        color: tier.hex_color(),
        key_pollutants: KEY_POLLUTANTS
            .iter()
            .map(|&p| (p.label(), snapshot.pollutants.format_value(p)))
            .collect(),
    }
}
