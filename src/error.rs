//! Error types for the PIT engine.
//!
//! The calculation functions themselves are total and never fail. Errors only
//! arise at the edges: loading regime files, validating configurations and
//! settings edits, and validating user-supplied requests before they reach the
//! engine.

use thiserror::Error;

/// The main error type for the PIT engine.
///
/// # Example
///
/// ```
/// use pit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/2026.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/2026.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
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

    /// The requested tax regime is not available in the catalog.
    #[error("Tax regime not found: {id}")]
    RegimeNotFound {
        /// The regime identifier that was requested.
        id: String,
    },

    /// A tax configuration value is out of range or inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A calculation request contained a value the engine must not receive.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The request field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
