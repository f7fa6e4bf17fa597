//! Environmental data sources
//!
//! [`EnvironmentalDataSource`] is the seam between the dashboard and whatever
//! produces AQI data. The only implementation today is
//! [`SyntheticDataSource`], which draws uniform random values standing in for
//! a prediction backend.

use std::ops::Range;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::{debug, instrument};

use crate::Result;
use crate::models::{
    AqiSnapshot, EnvironmentalData, Forecast, ForecastPoint, Location, PollutantReading,
};

/// Produces a current snapshot and 24-hour forecast for a location
#[async_trait]
pub trait EnvironmentalDataSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn generate(&self, location: &Location) -> Result<EnvironmentalData>;
}

/// Half-open draw range per pollutant
#[derive(Debug, Clone)]
pub struct PollutantRanges {
    pub pm25: Range<u32>,
    pub pm10: Range<u32>,
    pub no2: Range<u32>,
    pub so2: Range<u32>,
    pub co: Range<u32>,
    pub o3: Range<u32>,
}

pub const CURRENT_AQI_RANGE: Range<u32> = 50..350;
pub const FORECAST_AQI_RANGE: Range<u32> = 50..250;

pub const CURRENT_POLLUTANT_RANGES: PollutantRanges = PollutantRanges {
    pm25: 10..110,
    pm10: 20..170,
    no2: 5..85,
    so2: 2..62,
    co: 1..41,
    o3: 10..130,
};

pub const FORECAST_POLLUTANT_RANGES: PollutantRanges = PollutantRanges {
    pm25: 10..90,
    pm10: 20..140,
    no2: 5..65,
    so2: 2..42,
    co: 1..31,
    o3: 10..110,
};

/// Uniform random data with a fixed simulated latency
pub struct SyntheticDataSource {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl SyntheticDataSource {
    /// Create a source; `seed` makes the output reproducible
    #[must_use]
    pub fn new(latency: Duration, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        debug!("Synthetic data source seeded with {}", seed);
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            latency,
        }
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn sample(&self, location: &Location) -> EnvironmentalData {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let snapshot = AqiSnapshot {
            location: location.clone(),
            current_aqi: rng.random_range(CURRENT_AQI_RANGE),
            pollutants: draw_pollutants(&mut *rng, &CURRENT_POLLUTANT_RANGES),
        };

        let hourly = (0..Forecast::HOURS as u8)
            .map(|hour| {
                let aqi = rng.random_range(FORECAST_AQI_RANGE);
                let pollutants = draw_pollutants(&mut *rng, &FORECAST_POLLUTANT_RANGES);
                ForecastPoint::new(hour, aqi, pollutants)
            })
            .collect();

        EnvironmentalData::new(snapshot, Forecast::new(hourly))
    }
}

fn draw_pollutants(rng: &mut StdRng, ranges: &PollutantRanges) -> PollutantReading {
    PollutantReading {
        pm25: rng.random_range(ranges.pm25.clone()),
        pm10: rng.random_range(ranges.pm10.clone()),
        no2: rng.random_range(ranges.no2.clone()),
        so2: rng.random_range(ranges.so2.clone()),
        co: rng.random_range(ranges.co.clone()),
        o3: rng.random_range(ranges.o3.clone()),
    }
}

#[async_trait]
impl EnvironmentalDataSource for SyntheticDataSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    #[instrument(
        name = "generate_data",
        level = "debug",
        skip(self, location),
        fields(location = %location.name)
    )]
    async fn generate(&self, location: &Location) -> Result<EnvironmentalData> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let data = self.sample(location);
        debug!(
            "Generated AQI {} with {} forecast hours",
            data.snapshot.current_aqi,
            data.forecast.len()
        );
        Ok(data)
    }
}
