//! `AQI Horizon` - Air quality monitoring and prediction dashboard
//!
//! This library provides the logic behind the dashboard: AQI severity
//! classification, a swappable environmental data source with a synthetic
//! implementation, directory search, the selection state machine and the
//! chart and map shaping used by the presentation surfaces.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod logging;
pub mod map;
pub mod models;
pub mod selection;
pub mod severity;
pub mod source;
pub mod view;

// Re-export core types for public API
pub use config::AqiConfig;
pub use dashboard::Dashboard;
pub use directory::Directory;
pub use error::AqiError;
pub use models::{
    AqiSnapshot, EnvironmentalData, Forecast, ForecastPoint, Location, PollutantReading,
};
pub use selection::{Effect, Event, Selection, SelectionState};
pub use severity::{SeverityTier, classify};
pub use source::{EnvironmentalDataSource, SyntheticDataSource};
pub use view::DashboardView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AqiError>;
