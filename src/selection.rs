//! Location selection state machine
//!
//! The search and selection flow is a pure reducer: [`Selection::reduce`]
//! takes an [`Event`] and returns the next selection together with an
//! optional [`Effect`] for the driver to run (a directory search or a data
//! load). Nothing here sleeps, logs or touches the data source, so every
//! transition can be tested in isolation.
//!
//! ```text
//! Idle --submit--> Searching --found--> Results
//!                            --empty--> NoResults
//! Idle | Results | NoResults | Selected(Loaded) --pick--> Selected(Loading)
//! Selected(Loading) --loaded--> Selected(Loaded)
//! Selected(Loading) --failed--> Selected(Loaded) of the previous data, or Idle
//! Searching | Selected(Loading) --abandoned--> same as failed
//! Selected(Loaded) --submit--> Searching
//! ```

use serde::Serialize;

use crate::directory::validate_query;
use crate::models::{EnvironmentalData, Location};
use crate::{AqiError, Result};

/// Identifies one data load so late completions can be recognised
pub type RequestId = u64;

/// Load sub-phase of a selected location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    Loading { request: RequestId },
    Loaded,
}

/// Where the user is in the search and selection flow
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum SelectionState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        matches: Vec<Location>,
    },
    NoResults {
        query: String,
    },
    Selected {
        location: Location,
        phase: LoadPhase,
    },
}

/// Inputs to the reducer
#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted the search box
    SubmitQuery(String),
    /// Directory search finished for `query`
    SearchCompleted {
        query: String,
        matches: Vec<Location>,
    },
    /// User picked a result or a popular location
    Pick(Location),
    /// Data source finished the load started by `request`
    DataLoaded {
        request: RequestId,
        data: EnvironmentalData,
    },
    /// Data source failed the load started by `request`
    LoadFailed { request: RequestId, message: String },
    /// The driver gave up on whatever was in flight
    Abandoned,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Filter the directory for `query`
    RunSearch { query: String },
    /// Ask the data source for a bundle
    Generate {
        location: Location,
        request: RequestId,
    },
}

/// Current flow state plus the single displayed data slot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    state: SelectionState,
    displayed: Option<Box<EnvironmentalData>>,
    last_request: RequestId,
}

/// Result of applying one event
#[derive(Debug, Clone)]
pub struct Transition {
    pub selection: Selection,
    pub effect: Option<Effect>,
    /// False when the event was a stale completion and nothing changed
    pub applied: bool,
}

impl Transition {
    fn to(selection: Selection, effect: Option<Effect>) -> Self {
        Self {
            selection,
            effect,
            applied: true,
        }
    }

    fn ignored(selection: Selection) -> Self {
        Self {
            selection,
            effect: None,
            applied: false,
        }
    }
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Data currently shown, if any load has completed
    #[must_use]
    pub fn displayed(&self) -> Option<&EnvironmentalData> {
        self.displayed.as_deref()
    }

    /// A search or a data load is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.is_searching() || self.is_loading()
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self.state, SelectionState::Searching { .. })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SelectionState::Selected {
                phase: LoadPhase::Loading { .. },
                ..
            }
        )
    }

    /// Apply an event, returning the next selection and any effect to run
    pub fn reduce(&self, event: Event) -> Result<Transition> {
        match event {
            Event::SubmitQuery(raw) => self.submit(&raw),
            Event::SearchCompleted { query, matches } => self.complete_search(query, matches),
            Event::Pick(location) => self.pick(location),
            Event::DataLoaded { request, data } => Ok(self.load(request, data)),
            Event::LoadFailed { request, .. } => Ok(self.fail(request)),
            Event::Abandoned => Ok(self.abandon()),
        }
    }

    fn submit(&self, raw: &str) -> Result<Transition> {
        if self.is_busy() {
            return Err(AqiError::busy("cannot search while another request is running"));
        }
        let query = validate_query(raw)?.to_string();

        let next = Selection {
            state: SelectionState::Searching {
                query: query.clone(),
            },
            ..self.clone()
        };
        Ok(Transition::to(next, Some(Effect::RunSearch { query })))
    }

    fn complete_search(&self, query: String, matches: Vec<Location>) -> Result<Transition> {
        match &self.state {
            SelectionState::Searching { query: pending } if *pending == query => {
                let state = if matches.is_empty() {
                    SelectionState::NoResults { query }
                } else {
                    SelectionState::Results { query, matches }
                };
                Ok(Transition::to(
                    Selection {
                        state,
                        ..self.clone()
                    },
                    None,
                ))
            }
            SelectionState::Searching { query: pending } => Err(AqiError::invalid_transition(
                format!("search results for '{query}' arrived while searching for '{pending}'"),
            )),
            _ => Err(AqiError::invalid_transition(
                "search results arrived with no search in flight",
            )),
        }
    }

    fn pick(&self, location: Location) -> Result<Transition> {
        if self.is_busy() {
            return Err(AqiError::busy(
                "cannot select a location while another request is running",
            ));
        }
        if !location.has_valid_coordinates() {
            return Err(AqiError::invalid_location(format!(
                "'{}' has coordinates outside the valid range",
                location.name
            )));
        }

        let request = self.last_request + 1;
        let next = Selection {
            state: SelectionState::Selected {
                location: location.clone(),
                phase: LoadPhase::Loading { request },
            },
            displayed: self.displayed.clone(),
            last_request: request,
        };
        Ok(Transition::to(next, Some(Effect::Generate { location, request })))
    }

    fn load(&self, request: RequestId, data: EnvironmentalData) -> Transition {
        match &self.state {
            SelectionState::Selected {
                location,
                phase: LoadPhase::Loading { request: pending },
            } if *pending == request && data.location() == location => {
                let next = Selection {
                    state: SelectionState::Selected {
                        location: location.clone(),
                        phase: LoadPhase::Loaded,
                    },
                    displayed: Some(Box::new(data)),
                    last_request: self.last_request,
                };
                Transition::to(next, None)
            }
            _ => Transition::ignored(self.clone()),
        }
    }

    fn fail(&self, request: RequestId) -> Transition {
        match &self.state {
            SelectionState::Selected {
                phase: LoadPhase::Loading { request: pending },
                ..
            } if *pending == request => Transition::to(self.settled(), None),
            _ => Transition::ignored(self.clone()),
        }
    }

    fn abandon(&self) -> Transition {
        if self.is_busy() {
            Transition::to(self.settled(), None)
        } else {
            Transition::ignored(self.clone())
        }
    }

    /// Drop in-flight work and fall back to the displayed data, if any
    fn settled(&self) -> Selection {
        let state = match self.displayed() {
            Some(data) => SelectionState::Selected {
                location: data.location().clone(),
                phase: LoadPhase::Loaded,
            },
            None => SelectionState::Idle,
        };
        Selection {
            state,
            displayed: self.displayed.clone(),
            last_request: self.last_request,
        }
    }
}
