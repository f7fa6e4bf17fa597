//! Dashboard driver
//!
//! Owns the directory, the data source and the current [`Selection`], feeds
//! events through the reducer and runs the effects it asks for. The simulated
//! search latency lives here; the generation latency belongs to the data
//! source.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::config::AqiConfig;
use crate::directory::Directory;
use crate::models::{EnvironmentalData, Location};
use crate::selection::{Effect, Event, LoadPhase, Selection, SelectionState};
use crate::source::{EnvironmentalDataSource, SyntheticDataSource};
use crate::{AqiError, Result};

/// Interactive state for one user session
pub struct Dashboard {
    directory: Directory,
    source: Arc<dyn EnvironmentalDataSource>,
    selection: Selection,
    search_latency: Duration,
    popular_count: usize,
}

impl Dashboard {
    #[must_use]
    pub fn new(directory: Directory, source: Arc<dyn EnvironmentalDataSource>) -> Self {
        Self {
            directory,
            source,
            selection: Selection::new(),
            search_latency: Duration::ZERO,
            popular_count: 6,
        }
    }

    /// Build the dashboard described by the configuration
    pub fn from_config(config: &AqiConfig) -> Result<Self> {
        let directory = match &config.directory.path {
            Some(path) => Directory::load(path)?,
            None => Directory::builtin()?,
        };
        let source = SyntheticDataSource::new(
            config.simulation.generation_latency(),
            config.simulation.seed,
        );

        Ok(Self::new(directory, Arc::new(source))
            .with_search_latency(config.simulation.search_latency())
            .with_popular_count(config.directory.popular_count))
    }

    #[must_use]
    pub fn with_search_latency(mut self, latency: Duration) -> Self {
        self.search_latency = latency;
        self
    }

    #[must_use]
    pub fn with_popular_count(mut self, count: usize) -> Self {
        self.popular_count = count;
        self
    }

    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.selection.is_busy()
    }

    /// Data currently on screen
    #[must_use]
    pub fn displayed(&self) -> Option<&EnvironmentalData> {
        self.selection.displayed()
    }

    /// Quick picks shown while there are no search results
    #[must_use]
    pub fn popular(&self) -> &[Location] {
        self.directory.popular(self.popular_count)
    }

    /// Feed one event through the reducer and keep the result.
    ///
    /// Returns the effect the caller must run next, if any.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Effect>> {
        let transition = self.selection.reduce(event)?;
        if !transition.applied {
            warn!("Ignoring an outcome for a superseded request");
        }
        self.selection = transition.selection;
        Ok(transition.effect)
    }

    /// Run an effect and return the event reporting its outcome
    pub async fn run_effect(&self, effect: Effect) -> Result<Event> {
        match effect {
            Effect::RunSearch { query } => {
                if !self.search_latency.is_zero() {
                    tokio::time::sleep(self.search_latency).await;
                }
                let matches = self.directory.search(&query);
                debug!("Search for '{}' matched {} entries", query, matches.len());
                Ok(Event::SearchCompleted { query, matches })
            }
            Effect::Generate { location, request } => {
                let data = self.source.generate(&location).await?;
                Ok(Event::DataLoaded { request, data })
            }
        }
    }

    /// Search the directory. An empty result is reported as [`AqiError::NoMatch`].
    #[instrument(skip(self))]
    pub async fn submit_query(&mut self, query: &str) -> Result<Vec<Location>> {
        self.drive(Event::SubmitQuery(query.to_string())).await?;

        match self.selection.state() {
            SelectionState::Results { matches, .. } => {
                info!("Found {} locations", matches.len());
                Ok(matches.clone())
            }
            SelectionState::NoResults { query } => Err(AqiError::no_match(query.clone())),
            other => Err(AqiError::invalid_transition(format!(
                "search ended in unexpected state {other:?}"
            ))),
        }
    }

    /// Select a location and load its data, replacing whatever was shown.
    ///
    /// On failure the previously displayed data, if any, stays selected.
    #[instrument(skip(self, location), fields(location = %location.name))]
    pub async fn select(&mut self, location: Location) -> Result<&EnvironmentalData> {
        info!("Loading AQI data for {}", location.display_name());
        self.drive(Event::Pick(location.clone())).await?;

        match (self.selection.state(), self.selection.displayed()) {
            (
                SelectionState::Selected {
                    location: picked,
                    phase: LoadPhase::Loaded,
                },
                Some(data),
            ) if *picked == location && *data.location() == location => Ok(data),
            (state, _) => Err(AqiError::invalid_transition(format!(
                "load for {} ended in unexpected state {state:?}",
                location.name
            ))),
        }
    }

    /// Run an event and every effect it leads to.
    ///
    /// The selection is never left busy: a failed effect is reported to the
    /// reducer before the error is returned, and work left over from a
    /// dropped call is abandoned before the next one starts.
    async fn drive(&mut self, event: Event) -> Result<()> {
        if self.selection.is_busy() {
            warn!("Abandoning a request interrupted before it finished");
            self.dispatch(Event::Abandoned)?;
        }

        let mut next = self.dispatch(event)?;
        while let Some(effect) = next {
            let pending = match &effect {
                Effect::Generate { request, .. } => Some(*request),
                Effect::RunSearch { .. } => None,
            };
            let outcome = match self.run_effect(effect).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("Request failed: {}", err);
                    let recovery = match pending {
                        Some(request) => Event::LoadFailed {
                            request,
                            message: err.to_string(),
                        },
                        None => Event::Abandoned,
                    };
                    self.dispatch(recovery)?;
                    return Err(err);
                }
            };
            next = self.dispatch(outcome)?;
        }

        if self.selection.is_busy() {
            self.dispatch(Event::Abandoned)?;
            return Err(AqiError::data_source(
                "data source answered for a different location",
            ));
        }
        Ok(())
    }
}
