//! Data models for the AQI Horizon dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: Named geographic points from the directory
//! - Pollutants: Concentration snapshots and per-pollutant metadata
//! - Forecast: Current snapshot, hourly forecast and the generated bundle

pub mod forecast;
pub mod location;
pub mod pollutants;

// Re-export all public types for convenient access
pub use forecast::{AqiSnapshot, EnvironmentalData, Forecast, ForecastPoint};
pub use location::Location;
pub use pollutants::{Pollutant, PollutantReading};
