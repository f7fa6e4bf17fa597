//! Composed dashboard view
//!
//! [`DashboardView`] gathers everything the presentation surfaces need from
//! one [`EnvironmentalData`] bundle. It serializes to JSON for `--json` and
//! renders as text in the terminal.

use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::charts::{self, AqiChartPoint, ForecastInsights, PollutantChartRow};
use crate::map::{self, LocationDetails, MapMarker};
use crate::models::{EnvironmentalData, Location, Pollutant};
use crate::severity::{self, LegendEntry, SeverityTier, TierStyle};

const BAR_WIDTH: usize = 20;
const CHART_WIDTH: usize = 40;
const MAP_COLUMNS: usize = 40;
const MAP_ROWS: usize = 12;

/// Headline AQI card
#[derive(Debug, Clone, Serialize)]
pub struct AqiCard {
    pub location: String,
    pub aqi: u32,
    pub tier: SeverityTier,
    pub style: TierStyle,
}

/// One tile of the pollutant grid
#[derive(Debug, Clone, Serialize)]
pub struct PollutantCard {
    pub pollutant: Pollutant,
    pub label: &'static str,
    pub value: u32,
    pub unit: &'static str,
    pub description: &'static str,
    /// Indicator bar fill, 0-100
    pub fill_percent: u32,
}

/// Everything shown for a loaded location
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub card: AqiCard,
    pub pollutants: Vec<PollutantCard>,
    pub marker: MapMarker,
    pub details: LocationDetails,
    pub aqi_chart: Vec<AqiChartPoint>,
    pub pollutant_chart: Vec<PollutantChartRow>,
    pub insights: Option<ForecastInsights>,
    pub legend: Vec<LegendEntry>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardView {
    /// Compose the view; `chart_hours` limits the pollutant bar chart
    #[must_use]
    pub fn build(data: &EnvironmentalData, chart_hours: usize) -> Self {
        let snapshot = &data.snapshot;
        let tier = snapshot.tier();

        Self {
            card: AqiCard {
                location: snapshot.location.name.clone(),
                aqi: snapshot.current_aqi,
                tier,
                style: *tier.style(),
            },
            pollutants: snapshot
                .pollutants
                .iter()
                .map(|(pollutant, value)| PollutantCard {
                    pollutant,
                    label: pollutant.label(),
                    value,
                    unit: pollutant.unit(),
                    description: pollutant.description(),
                    fill_percent: snapshot.pollutants.indicator_percent(pollutant),
                })
                .collect(),
            marker: map::marker(snapshot),
            details: map::details(snapshot),
            aqi_chart: charts::aqi_series(&data.forecast),
            pollutant_chart: charts::pollutant_rows(&data.forecast, chart_hours),
            insights: charts::insights(&data.forecast),
            legend: severity::legend(),
            generated_at: data.generated_at,
        }
    }
}

fn bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn scaled(value: u32, max: u32, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (value as usize * width).div_ceil(max as usize)
}

impl Display for AqiCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🌬️  Current Air Quality in {}", self.location)?;
        writeln!(f, "   {} AQI {}  [{}]", self.style.emoji, self.aqi, self.style.label)
    }
}

impl Display for PollutantCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "   {:<6} {:>4} {:<6} {} {}",
            self.label,
            self.value,
            self.unit,
            bar(self.fill_percent as usize * BAR_WIDTH / 100, BAR_WIDTH),
            self.description
        )
    }
}

impl DashboardView {
    fn fmt_map(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column =
            ((self.marker.x / map::VIEWBOX_WIDTH) * (MAP_COLUMNS - 1) as f64).round() as usize;
        let row = ((self.marker.y / map::VIEWBOX_HEIGHT) * (MAP_ROWS - 1) as f64).round() as usize;

        writeln!(f, "👁️  Location Map")?;
        writeln!(f, "   ┌{}┐", "─".repeat(MAP_COLUMNS))?;
        for r in 0..MAP_ROWS {
            let line: String = (0..MAP_COLUMNS)
                .map(|c| if r == row && c == column { '◉' } else { '·' })
                .collect();
            writeln!(f, "   │{line}│")?;
        }
        writeln!(f, "   └{}┘", "─".repeat(MAP_COLUMNS))?;
        writeln!(
            f,
            "   {} AQI {} at {}",
            self.marker.name, self.marker.aqi, self.marker.caption
        )?;
        writeln!(f, "   City: {}", self.details.city)?;
        writeln!(f, "   Coordinates: {}", self.details.coordinates)?;
        writeln!(f, "   Status: {}", self.details.status)?;
        for (label, value) in &self.details.key_pollutants {
            writeln!(f, "   {label}: {value}")?;
        }
        Ok(())
    }

    fn fmt_charts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis_max = charts::aqi_axis_max(&self.aqi_chart);
        writeln!(f, "📈 24-Hour AQI Forecast (axis 0-{axis_max})")?;
        for point in &self.aqi_chart {
            writeln!(
                f,
                "   {:>5} {} {:>3} {}",
                point.time,
                bar(scaled(point.aqi, axis_max, CHART_WIDTH), CHART_WIDTH),
                point.aqi,
                point.tier.emoji()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "📊 {}-Hour Pollutant Forecast", self.pollutant_chart.len())?;
        if let Some(first) = self.pollutant_chart.first() {
            let header: Vec<_> = first.bars.iter().map(|b| format!("{:>6}", b.label)).collect();
            writeln!(f, "   {:>5} {}", "", header.join(""))?;
        }
        for row in &self.pollutant_chart {
            let values: Vec<_> = row.bars.iter().map(|b| format!("{:>6}", b.value)).collect();
            writeln!(f, "   {:>5} {}", row.time, values.join(""))?;
        }
        Ok(())
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.card)?;
        writeln!(f)?;
        writeln!(f, "🧪 Pollutants")?;
        for card in &self.pollutants {
            writeln!(f, "{card}")?;
        }
        writeln!(f)?;
        self.fmt_map(f)?;
        writeln!(f)?;
        self.fmt_charts(f)?;

        if let Some(insights) = &self.insights {
            writeln!(f)?;
            writeln!(f, "💡 Prediction Insights")?;
            writeln!(
                f,
                "   • Peak AQI expected around {} ({})",
                insights.peak_time, insights.peak_aqi
            )?;
            writeln!(
                f,
                "   • Best air quality window: {} ({})",
                insights.best_time, insights.best_aqi
            )?;
            writeln!(f, "   • Average forecast AQI: {:.0}", insights.average_aqi)?;
            writeln!(
                f,
                "   • Hours above Moderate: {}/{}",
                insights.unhealthy_hours,
                self.aqi_chart.len()
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", Legend(&self.legend))?;
        writeln!(
            f,
            "   Generated at {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// AQI color scale as text
pub struct Legend<'a>(pub &'a [LegendEntry]);

impl Display for Legend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🎨 AQI Color Scale")?;
        for entry in self.0 {
            writeln!(
                f,
                "   {} {:<31} {:>7}  {}",
                entry.tier.emoji(),
                entry.label,
                entry.range,
                entry.hex_color
            )?;
        }
        Ok(())
    }
}

/// Numbered location list, as shown for search results
pub struct LocationList<'a>(pub &'a [Location]);

impl Display for LocationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, location) in self.0.iter().enumerate() {
            writeln!(f, "  {:>2}. 📍 {}", index + 1, location.name)?;
            if let Some(region) = &location.region {
                writeln!(f, "       {region} ({})", location.format_coordinates())?;
            } else {
                writeln!(f, "       {}", location.format_coordinates())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AqiSnapshot, Forecast, ForecastPoint, PollutantReading};

    fn data() -> EnvironmentalData {
        let hourly = (0..24)
            .map(|hour| {
                ForecastPoint::new(hour, 60 + u32::from(hour) * 5, PollutantReading::default())
            })
            .collect();
        EnvironmentalData::new(
            AqiSnapshot {
                location: Location::new("PWD Grounds, Vijayawada", 16.5074, 80.6279),
                current_aqi: 180,
                pollutants: PollutantReading {
                    pm25: 64,
                    pm10: 150,
                    no2: 30,
                    so2: 10,
                    co: 5,
                    o3: 70,
                },
            },
            Forecast::new(hourly),
        )
    }

    #[test]
    fn test_build_view() {
        let view = DashboardView::build(&data(), 12);
        assert_eq!(view.card.tier, SeverityTier::Unhealthy);
        assert_eq!(view.card.style.label, "Unhealthy");
        assert_eq!(view.pollutants.len(), 6);
        assert_eq!(view.pollutants[1].fill_percent, 100);
        assert_eq!(view.aqi_chart.len(), 24);
        assert_eq!(view.pollutant_chart.len(), 12);
        assert_eq!(view.insights.as_ref().unwrap().peak_time, "23:00");
        assert_eq!(view.marker.color, view.details.color);
    }

    #[test]
    fn test_tier_agrees_across_surfaces() {
        let view = DashboardView::build(&data(), 12);
        assert_eq!(view.card.tier, view.marker.tier);
        assert_eq!(view.details.status, view.card.tier.style().short_label);
    }

    #[test]
    fn test_render_text() {
        let text = DashboardView::build(&data(), 6).to_string();
        assert!(text.contains("Current Air Quality in PWD Grounds, Vijayawada"));
        assert!(text.contains("AQI 180"));
        assert!(text.contains("6-Hour Pollutant Forecast"));
        assert!(text.contains("Peak AQI expected around 23:00"));
        assert!(text.contains("Hazardous"));
        assert_eq!(text.matches('◉').count(), 1);
    }

    #[test]
    fn test_view_serializes() {
        let json = serde_json::to_value(DashboardView::build(&data(), 12)).unwrap();
        assert_eq!(json["card"]["aqi"], 180);
        assert_eq!(json["card"]["tier"], "Unhealthy");
        assert_eq!(json["aqi_chart"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn test_location_list() {
        let locations = vec![
            Location::with_region("Tokyo", "Japan", 35.6762, 139.6503),
            Location::new("Nowhere", 0.0, 0.0),
        ];
        let text = LocationList(&locations).to_string();
        assert!(text.contains(" 1. 📍 Tokyo"));
        assert!(text.contains("Japan (35.6762, 139.6503)"));
        assert!(text.contains(" 2. 📍 Nowhere"));
    }

    #[test]
    fn test_bar_helpers() {
        assert_eq!(bar(3, 5), "███░░");
        assert_eq!(bar(9, 5), "█████");
        assert_eq!(scaled(125, 250, 40), 20);
        assert_eq!(scaled(1, 0, 40), 0);
    }
}
