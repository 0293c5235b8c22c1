//! Error types for kasta-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kasta-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook could not be opened or a sheet could not be read
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// CSV parsing error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Options file could not be parsed
    #[error("invalid options file '{path}': {source}")]
    Options {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A scene line started with an empty device name
    #[error("empty device name in line '{0}'")]
    EmptyDeviceName(String),

    /// A scene line names a device with no known type
    #[error("cannot determine device type for '{0}'")]
    UnknownDevice(String),

    /// No ON/OFF status token in a dimmer line
    #[error("no ON/OFF status in line '{0}'")]
    MissingStatus(String),

    /// Fan lines need a fixed number of positional tokens
    #[error("fan line '{line}' has {found} tokens, expected at least {expected}")]
    FanTokenCount {
        line: String,
        expected: usize,
        found: usize,
    },

    /// Fan speed token is not an integer
    #[error("invalid fan speed '{speed}' in line '{line}'")]
    InvalidFanSpeed { line: String, speed: String },

    /// Remote link index is not a positive integer
    #[error("invalid link index '{index}' in line '{line}'")]
    InvalidLinkIndex { line: String, index: String },

    /// Remote link line without an `index: description` pair
    #[error("missing link description in line '{0}'")]
    MissingLinkDescription(String),

    /// Remote link description starts with none of SCENE, GROUP, DEVICE
    #[error("unknown link target in '{0}'")]
    UnknownLinkTarget(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error concerns a single source line and can be skipped
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            Error::EmptyDeviceName(_)
                | Error::UnknownDevice(_)
                | Error::MissingStatus(_)
                | Error::FanTokenCount { .. }
                | Error::InvalidFanSpeed { .. }
                | Error::InvalidLinkIndex { .. }
                | Error::MissingLinkDescription(_)
                | Error::UnknownLinkTarget(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_level_errors() {
        assert!(Error::UnknownDevice("Lamp".to_string()).is_line_level());
        assert!(Error::FanTokenCount {
            line: "Fan1 ON".to_string(),
            expected: 6,
            found: 2,
        }
        .is_line_level());
        assert!(!Error::Io(std::io::Error::other("boom")).is_line_level());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidLinkIndex {
            line: "x: SCENE A".to_string(),
            index: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid link index 'x' in line 'x: SCENE A'");
    }
}
