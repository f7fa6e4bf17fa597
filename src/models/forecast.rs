//! Current AQI snapshot, hourly forecast and the bundle that carries both

use super::{Location, PollutantReading};
use crate::severity::{SeverityTier, classify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Air quality "now" for a selected location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AqiSnapshot {
    /// Location this snapshot belongs to
    pub location: Location,
    /// Current AQI value
    pub current_aqi: u32,
    /// Current pollutant concentrations
    pub pollutants: PollutantReading,
}

impl AqiSnapshot {
    #[must_use]
    pub fn tier(&self) -> SeverityTier {
        classify(self.current_aqi)
    }
}

/// One hour of a forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Hour offset from the start of the forecast (0-23)
    pub hour: u8,
    /// Axis label, e.g. "7:00"
    pub time: String,
    pub aqi: u32,
    pub pollutants: PollutantReading,
}

impl ForecastPoint {
    /// Create a point for the given hour; the label is derived from it
    #[must_use]
    pub fn new(hour: u8, aqi: u32, pollutants: PollutantReading) -> Self {
        Self {
            hour,
            time: Self::hour_label(hour),
            aqi,
            pollutants,
        }
    }

    /// Label for an hour offset ("0:00" .. "23:00")
    #[must_use]
    pub fn hour_label(hour: u8) -> String {
        format!("{hour}:00")
    }

    #[must_use]
    pub fn tier(&self) -> SeverityTier {
        classify(self.aqi)
    }
}

/// Hourly forecast (sorted by hour)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Forecast {
    pub hourly: Vec<ForecastPoint>,
}

impl Forecast {
    /// Number of hourly points in a complete forecast
    pub const HOURS: usize = 24;

    #[must_use]
    pub fn new(hourly: Vec<ForecastPoint>) -> Self {
        Self { hourly }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hourly.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty()
    }

    /// Exactly 24 points labelled "0:00" .. "23:00" in order
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.hourly.len() == Self::HOURS
            && self
                .hourly
                .iter()
                .enumerate()
                .all(|(i, point)| {
                    usize::from(point.hour) == i
                        && point.time == ForecastPoint::hour_label(point.hour)
                })
    }

    /// Point with the highest AQI; the earliest one wins a tie
    #[must_use]
    pub fn peak(&self) -> Option<&ForecastPoint> {
        self.hourly
            .iter()
            .reduce(|max, point| if point.aqi > max.aqi { point } else { max })
    }

    /// Point with the lowest AQI; the earliest one wins a tie
    #[must_use]
    pub fn best(&self) -> Option<&ForecastPoint> {
        self.hourly
            .iter()
            .reduce(|min, point| if point.aqi < min.aqi { point } else { min })
    }
}

/// Everything one data load produces for a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnvironmentalData {
    pub snapshot: AqiSnapshot,
    pub forecast: Forecast,
    /// When this bundle was generated
    pub generated_at: DateTime<Utc>,
}

impl EnvironmentalData {
    #[must_use]
    pub fn new(snapshot: AqiSnapshot, forecast: Forecast) -> Self {
        Self {
            snapshot,
            forecast,
            generated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.snapshot.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_from(aqis: &[u32]) -> Forecast {
        let hourly = aqis
            .iter()
            .enumerate()
            .map(|(hour, &aqi)| ForecastPoint::new(hour as u8, aqi, PollutantReading::default()))
            .collect();
        Forecast::new(hourly)
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(ForecastPoint::hour_label(0), "0:00");
        assert_eq!(ForecastPoint::hour_label(23), "23:00");
    }

    #[test]
    fn test_peak_and_best_prefer_earliest() {
        let forecast = forecast_from(&[120, 80, 200, 80, 200]);
        assert_eq!(forecast.peak().unwrap().time, "2:00");
        assert_eq!(forecast.best().unwrap().time, "1:00");
    }

    #[test]
    fn test_empty_forecast_has_no_peak() {
        let forecast = Forecast::default();
        assert!(forecast.peak().is_none());
        assert!(forecast.best().is_none());
        assert!(!forecast.is_complete());
    }

    #[test]
    fn test_is_complete() {
        let forecast = forecast_from(&[100; 24]);
        assert!(forecast.is_complete());

        let short = forecast_from(&[100; 23]);
        assert!(!short.is_complete());
    }

    #[test]
    fn test_snapshot_tier() {
        let snapshot = AqiSnapshot {
            location: Location::new("Tirumala, Tirupati", 13.6833, 79.3474),
            current_aqi: 151,
            pollutants: PollutantReading::default(),
        };
        assert_eq!(snapshot.tier(), SeverityTier::Unhealthy);
    }
}
