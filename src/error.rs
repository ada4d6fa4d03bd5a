//! Error types for the course engine.
//!
//! The scheduling and aggregation operations themselves never fail: malformed
//! input degrades to empty output or uncounted values. Errors only surface at
//! the edges, when parsing wall-clock strings, building band sets and loading
//! configuration.

use thiserror::Error;

/// The main error type for the course engine.
///
/// # Example
///
/// ```
/// use course_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/thresholds.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/thresholds.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No band set is registered under the requested name.
    #[error("Band set not found: {name}")]
    BandSetNotFound {
        /// The band set name that was requested.
        name: String,
    },

    /// A band set could not be built from its bands.
    #[error("Invalid band set '{name}': {message}")]
    InvalidBandSet {
        /// The name of the band set.
        name: String,
        /// What made the band set invalid.
        message: String,
    },

    /// A wall-clock string was not in `HH:mm` or `HH:mm:ss` form.
    #[error("Invalid time of day: '{value}' (expected HH:mm)")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A weekday name was not recognised.
    #[error("Invalid weekday: '{value}'")]
    InvalidWeekday {
        /// The rejected input.
        value: String,
    },

    /// A calendar date string was not in `YYYY-MM-DD` form.
    #[error("Invalid calendar date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
