//! AQI severity classification
//!
//! Maps an AQI value to one of six severity tiers using fixed inclusive upper
//! bounds, and provides the display style for each tier as a pure lookup
//! table. Every presentation surface goes through [`classify`] so the tier
//! shown on the AQI card, the map marker and the legend can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tiers, in ascending order of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthySensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301 and above
    Hazardous,
}

/// Icon category used next to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconCategory {
    Informational,
    Warning,
}

/// Glyph drawn for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierGlyph {
    Check,
    Alert,
    Danger,
}

/// Display style for a tier, independent of any rendering toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierStyle {
    /// Full level label, e.g. "Unhealthy for Sensitive Groups"
    pub label: &'static str,
    /// Compact label for badges on the map
    pub short_label: &'static str,
    /// Marker and badge color
    pub hex_color: &'static str,
    /// Utility class for the badge background
    pub badge_class: &'static str,
    /// Utility class for the icon and text
    pub text_class: &'static str,
    pub icon: IconCategory,
    pub glyph: TierGlyph,
    /// Terminal marker
    pub emoji: &'static str,
}

const STYLES: [TierStyle; 6] = [
    TierStyle {
        label: "Good",
        short_label: "Good",
        hex_color: "#22c55e",
        badge_class: "bg-green-500",
        text_class: "text-green-700",
        icon: IconCategory::Informational,
        glyph: TierGlyph::Check,
        emoji: "🟢",
    },
    TierStyle {
        label: "Moderate",
        short_label: "Moderate",
        hex_color: "#eab308",
        badge_class: "bg-yellow-500",
        text_class: "text-yellow-700",
        icon: IconCategory::Informational,
        glyph: TierGlyph::Alert,
        emoji: "🟡",
    },
    TierStyle {
        label: "Unhealthy for Sensitive Groups",
        short_label: "Unhealthy for Sensitive",
        hex_color: "#f97316",
        badge_class: "bg-orange-500",
        text_class: "text-orange-700",
        icon: IconCategory::Warning,
        glyph: TierGlyph::Alert,
        emoji: "🟠",
    },
    TierStyle {
        label: "Unhealthy",
        short_label: "Unhealthy",
        hex_color: "#ef4444",
        badge_class: "bg-red-500",
        text_class: "text-red-700",
        icon: IconCategory::Warning,
        glyph: TierGlyph::Danger,
        emoji: "🔴",
    },
    TierStyle {
        label: "Very Unhealthy",
        short_label: "Very Unhealthy",
        hex_color: "#8b5cf6",
        badge_class: "bg-purple-500",
        text_class: "text-purple-700",
        icon: IconCategory::Warning,
        glyph: TierGlyph::Danger,
        emoji: "🟣",
    },
    TierStyle {
        label: "Hazardous",
        short_label: "Hazardous",
        hex_color: "#7f1d1d",
        badge_class: "bg-red-900",
        text_class: "text-red-900",
        icon: IconCategory::Warning,
        glyph: TierGlyph::Danger,
        emoji: "🟤",
    },
];

/// Classify an AQI value. Total over all integers; negative input is Good.
#[must_use]
pub fn classify(aqi: impl Into<i64>) -> SeverityTier {
    match aqi.into() {
        i64::MIN..=50 => SeverityTier::Good,
        51..=100 => SeverityTier::Moderate,
        101..=150 => SeverityTier::UnhealthySensitive,
        151..=200 => SeverityTier::Unhealthy,
        201..=300 => SeverityTier::VeryUnhealthy,
        _ => SeverityTier::Hazardous,
    }
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 6] = [
        SeverityTier::Good,
        SeverityTier::Moderate,
        SeverityTier::UnhealthySensitive,
        SeverityTier::Unhealthy,
        SeverityTier::VeryUnhealthy,
        SeverityTier::Hazardous,
    ];

    fn index(self) -> usize {
        match self {
            SeverityTier::Good => 0,
            SeverityTier::Moderate => 1,
            SeverityTier::UnhealthySensitive => 2,
            SeverityTier::Unhealthy => 3,
            SeverityTier::VeryUnhealthy => 4,
            SeverityTier::Hazardous => 5,
        }
    }

    #[must_use]
    pub fn style(self) -> &'static TierStyle {
        &STYLES[self.index()]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.style().label
    }

    #[must_use]
    pub fn hex_color(self) -> &'static str {
        self.style().hex_color
    }

    #[must_use]
    pub fn icon(self) -> IconCategory {
        self.style().icon
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        self.style().emoji
    }

    /// Inclusive AQI range covered by this tier; `None` upper bound is open
    #[must_use]
    pub fn range(self) -> (u32, Option<u32>) {
        match self {
            SeverityTier::Good => (0, Some(50)),
            SeverityTier::Moderate => (51, Some(100)),
            SeverityTier::UnhealthySensitive => (101, Some(150)),
            SeverityTier::Unhealthy => (151, Some(200)),
            SeverityTier::VeryUnhealthy => (201, Some(300)),
            SeverityTier::Hazardous => (301, None),
        }
    }

    /// Range formatted for the legend, e.g. "51-100" or "301+"
    #[must_use]
    pub fn range_label(self) -> String {
        match self.range() {
            (low, Some(high)) => format!("{low}-{high}"),
            (low, None) => format!("{low}+"),
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the AQI color scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub tier: SeverityTier,
    pub label: &'static str,
    pub range: String,
    pub hex_color: &'static str,
}

/// Color scale legend, from Good to Hazardous
#[must_use]
pub fn legend() -> Vec<LegendEntry> {
    SeverityTier::ALL
        .into_iter()
        .map(|tier| LegendEntry {
            tier,
            label: tier.label(),
            range: tier.range_label(),
            hex_color: tier.hex_color(),
        })
        .collect()
}
