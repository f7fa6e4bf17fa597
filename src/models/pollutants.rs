//! Pollutant concentration model and per-pollutant display metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concentration snapshot for the six tracked pollutants.
///
/// Units are fixed per pollutant, see [`Pollutant::unit`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollutantReading {
    pub pm25: u32,
    pub pm10: u32,
    pub no2: u32,
    pub so2: u32,
    pub co: u32,
    pub o3: u32,
}

/// Tracked pollutants, in card order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    So2,
    Co,
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Display label with chemical subscripts
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO₂",
            Pollutant::So2 => "SO₂",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O₃",
        }
    }

    /// ASCII key used for chart series
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM25",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "μg/m³",
            Pollutant::No2 | Pollutant::So2 | Pollutant::O3 => "ppb",
            Pollutant::Co => "ppm",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Fine Particles",
            Pollutant::Pm10 => "Coarse Particles",
            Pollutant::No2 => "Nitrogen Dioxide",
            Pollutant::So2 => "Sulfur Dioxide",
            Pollutant::Co => "Carbon Monoxide",
            Pollutant::O3 => "Ozone",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl PollutantReading {
    /// Concentration of a single pollutant
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> u32 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    /// All pollutants paired with their concentration, in card order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, u32)> + '_ {
        Pollutant::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Fill of the card indicator bar in percent, capped at 100
    #[must_use]
    pub fn indicator_percent(&self, pollutant: Pollutant) -> u32 {
        self.get(pollutant).min(100)
    }

    /// Format a single value with its unit, e.g. "42 μg/m³"
    #[must_use]
    pub fn format_value(&self, pollutant: Pollutant) -> String {
        format!("{} {}", self.get(pollutant), pollutant.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> PollutantReading {
        PollutantReading {
            pm25: 42,
            pm10: 130,
            no2: 20,
            so2: 7,
            co: 3,
            o3: 64,
        }
    }

    #[test]
    fn test_get_and_iter_follow_card_order() {
        let values: Vec<_> = reading().iter().collect();
        assert_eq!(values.len(), 6);
        assert_eq!(values[0], (Pollutant::Pm25, 42));
        assert_eq!(values[5], (Pollutant::O3, 64));
    }

    #[test]
    fn test_indicator_caps_at_full_bar() {
        let r = reading();
        assert_eq!(r.indicator_percent(Pollutant::Pm25), 42);
        assert_eq!(r.indicator_percent(Pollutant::Pm10), 100);
    }

    #[test]
    fn test_units() {
        assert_eq!(Pollutant::Pm25.unit(), "μg/m³");
        assert_eq!(Pollutant::Co.unit(), "ppm");
        assert_eq!(reading().format_value(Pollutant::O3), "64 ppb");
    }
}
