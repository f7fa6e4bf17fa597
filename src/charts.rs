//! Chart data shaping for the forecast panels
//!
//! Turns a [`Forecast`] into the series a chart renderer consumes: the
//! 24-hour AQI line, the pollutant bar chart for the first hours, and a few
//! headline insights.

use serde::Serialize;

use crate::models::{Forecast, Pollutant};
use crate::severity::{SeverityTier, classify};

/// Pollutants drawn on the bar chart, in legend order
pub const CHART_POLLUTANTS: [Pollutant; 4] =
    [Pollutant::Pm25, Pollutant::Pm10, Pollutant::No2, Pollutant::O3];

/// Bar color for a pollutant series
#[must_use]
pub fn series_color(pollutant: Pollutant) -> &'static str {
    match pollutant {
        Pollutant::Pm25 => "#ef4444",
        Pollutant::Pm10 => "#f97316",
        Pollutant::No2 => "#eab308",
        Pollutant::O3 => "#22c55e",
        Pollutant::So2 => "#64748b",
        Pollutant::Co => "#0ea5e9",
    }
}

/// One point of the AQI line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiChartPoint {
    pub time: String,
    pub aqi: u32,
    pub tier: SeverityTier,
}

/// One value in a grouped bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantBar {
    pub key: &'static str,
    pub label: &'static str,
    pub value: u32,
    pub color: &'static str,
}

/// All bars for one hour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantChartRow {
    pub time: String,
    pub bars: Vec<PollutantBar>,
}

/// Headline numbers shown under the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastInsights {
    /// Hour with the highest AQI
    pub peak_time: String,
    pub peak_aqi: u32,
    /// Hour with the lowest AQI
    pub best_time: String,
    pub best_aqi: u32,
    pub average_aqi: f64,
    /// Hours classified above Moderate
    pub unhealthy_hours: usize,
}

/// AQI series covering every forecast hour
#[must_use]
pub fn aqi_series(forecast: &Forecast) -> Vec<AqiChartPoint> {
    forecast
        .hourly
        .iter()
        .map(|point| AqiChartPoint {
            time: point.time.clone(),
            aqi: point.aqi,
            tier: classify(point.aqi),
        })
        .collect()
}

/// Pollutant bars for the first `hours` of the forecast
#[must_use]
pub fn pollutant_rows(forecast: &Forecast, hours: usize) -> Vec<PollutantChartRow> {
    forecast
        .hourly
        .iter()
        .take(hours)
        .map(|point| PollutantChartRow {
            time: point.time.clone(),
            bars: CHART_POLLUTANTS
                .iter()
                .map(|&pollutant| PollutantBar {
                    key: pollutant.key(),
                    label: pollutant.label(),
                    value: point.pollutants.get(pollutant),
                    color: series_color(pollutant),
                })
                .collect(),
        })
        .collect()
}

/// Peak, best window and average; `None` for an empty forecast
#[must_use]
pub fn insights(forecast: &Forecast) -> Option<ForecastInsights> {
    let peak = forecast.peak()?;
    let best = forecast.best()?;

    let total: u64 = forecast.hourly.iter().map(|p| u64::from(p.aqi)).sum();
    let average_aqi = total as f64 / forecast.len() as f64;
    let unhealthy_hours = forecast
        .hourly
        .iter()
        .filter(|p| p.tier() > SeverityTier::Moderate)
        .count();

    Some(ForecastInsights {
        peak_time: peak.time.clone(),
        peak_aqi: peak.aqi,
        best_time: best.time.clone(),
        best_aqi: best.aqi,
        average_aqi,
        unhealthy_hours,
    })
}

/// Upper bound for the AQI axis, rounded up to the next 50
#[must_use]
pub fn aqi_axis_max(series: &[AqiChartPoint]) -> u32 {
    let max = series.iter().map(|p| p.aqi).max().unwrap_or(0);
    max.div_ceil(50).max(1) * 50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastPoint, PollutantReading};

    fn forecast(aqis: &[u32]) -> Forecast {
        Forecast::new(
            aqis.iter()
                .enumerate()
                .map(|(hour, &aqi)| {
                    ForecastPoint::new(
                        hour as u8,
                        aqi,
                        PollutantReading {
                            pm25: 10 + hour as u32,
                            pm10: 20,
                            no2: 5,
                            so2: 2,
                            co: 1,
                            o3: 30,
                        },
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_aqi_series_covers_all_hours() {
        let series = aqi_series(&forecast(&[60; 24]));
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].time, "0:00");
        assert_eq!(series[0].tier, SeverityTier::Moderate);
    }

    #[test]
    fn test_pollutant_rows_take_first_hours() {
        let rows = pollutant_rows(&forecast(&[60; 24]), 12);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[11].time, "11:00");

        let keys: Vec<_> = rows[0].bars.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["PM25", "PM10", "NO2", "O3"]);
        assert_eq!(rows[3].bars[0].value, 13);
    }

    #[test]
    fn test_pollutant_rows_on_short_forecast() {
        assert_eq!(pollutant_rows(&forecast(&[60; 5]), 12).len(), 5);
    }

    #[test]
    fn test_insights() {
        let result = insights(&forecast(&[100, 220, 40, 220, 40])).unwrap();
        assert_eq!(result.peak_time, "1:00");
        assert_eq!(result.peak_aqi, 220);
        assert_eq!(result.best_time, "2:00");
        assert_eq!(result.best_aqi, 40);
        assert!((result.average_aqi - 124.0).abs() < f64::EPSILON);
        assert_eq!(result.unhealthy_hours, 2);
    }

    #[test]
    fn test_insights_empty() {
        assert!(insights(&Forecast::default()).is_none());
    }

    #[test]
    fn test_axis_max() {
        assert_eq!(aqi_axis_max(&aqi_series(&forecast(&[60, 249]))), 250);
        assert_eq!(aqi_axis_max(&aqi_series(&forecast(&[251]))), 300);
        assert_eq!(aqi_axis_max(&[]), 50);
    }
}
