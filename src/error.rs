//! Error types and handling for the AQI Horizon dashboard

use thiserror::Error;

/// Main error type for the AQI Horizon library
#[derive(Error, Debug)]
pub enum AqiError {
    /// Search was submitted without any text
    #[error("Search query is empty")]
    EmptyQuery,

    /// Search finished but nothing in the directory matched
    #[error("No location matches '{query}'")]
    NoMatch { query: String },

    /// A search or data load is still running
    #[error("Busy: {message}")]
    Busy { message: String },

    /// Event does not apply to the current selection state
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// Picked location cannot be shown on the map
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Directory file could not be parsed or is inconsistent
    #[error("Directory error: {message}")]
    Directory { message: String },

    /// Environmental data source failed to produce a bundle
    #[error("Data source error: {message}")]
    DataSource { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AqiError {
    /// Create a new no-match error for the given query
    pub fn no_match<S: Into<String>>(query: S) -> Self {
        Self::NoMatch {
            query: query.into(),
        }
    }

    /// Create a new busy error
    pub fn busy<S: Into<String>>(message: S) -> Self {
        Self::Busy {
            message: message.into(),
        }
    }

    /// Create a new invalid transition error
    pub fn invalid_transition<S: Into<String>>(message: S) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }

    /// Create a new invalid location error
    pub fn invalid_location<S: Into<String>>(message: S) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new directory error
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory {
            message: message.into(),
        }
    }

    /// Create a new data source error
    pub fn data_source<S: Into<String>>(message: S) -> Self {
        Self::DataSource {
            message: message.into(),
        }
    }

    /// Informational conditions are shown as notices rather than failures
    #[must_use]
    pub fn is_notice(&self) -> bool {
        matches!(self, AqiError::NoMatch { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AqiError::EmptyQuery => {
                "Search required: please enter a city or location name.".to_string()
            }
            AqiError::NoMatch { .. } => {
                "No results found. Try searching for a different city or location.".to_string()
            }
            AqiError::Busy { .. } => {
                "Still loading, please wait for the current request.".to_string()
            }
            AqiError::InvalidTransition { message } | AqiError::InvalidLocation { message } => {
                message.clone()
            }
            AqiError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            AqiError::Directory { message } => {
                format!("Could not load the location directory: {message}")
            }
            AqiError::DataSource { .. } => {
                "Unable to load AQI data for this location.".to_string()
            }
            AqiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AqiError::no_match("atlantis");
        assert!(matches!(err, AqiError::NoMatch { .. }));
        assert_eq!(err.to_string(), "No location matches 'atlantis'");

        let err = AqiError::config("bad latency");
        assert!(matches!(err, AqiError::Config { .. }));

        let err = AqiError::busy("search running");
        assert!(matches!(err, AqiError::Busy { .. }));
    }

    #[test]
    fn test_user_messages() {
        assert!(AqiError::EmptyQuery.user_message().contains("enter a city"));
        assert!(AqiError::no_match("x").user_message().contains("No results"));
        assert!(
            AqiError::directory("missing name")
                .user_message()
                .contains("missing name")
        );
    }

    #[test]
    fn test_no_match_is_notice() {
        assert!(AqiError::no_match("x").is_notice());
        assert!(!AqiError::EmptyQuery.is_notice());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AqiError = io_err.into();
        assert!(matches!(err, AqiError::Io { .. }));
    }
}
