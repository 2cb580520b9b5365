//! Error handling for the DEM viewer
//!
//! One crate-wide error type. Precondition violations on the unchecked grid
//! and gradient accessors still panic; everything a caller can reasonably
//! recover from comes back as a `ViewerError`.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for the viewer core
#[derive(Debug)]
pub enum ViewerError {
    // Grid Errors
    EmptyGrid,
    GridIndexOutOfBounds {
        row: u64,
        col: u64,
        rows: u64,
        cols: u64,
    },
    UnsupportedSource {
        kind: String,
    },

    // Gradient Errors
    EmptyGradient,

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // System Errors
    IoError {
        path: String,
        error: String,
    },
    ParseError {
        value: String,
        expected_type: String,
    },
    DeserializationError {
        context: String,
        error: String,
    },
    StateError {
        expected: String,
        actual: String,
    },
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EmptyGrid => write!(f, "Elevation grid is empty"),
            ViewerError::GridIndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "Grid index ({}, {}) out of bounds for {}x{} grid",
                row, col, rows, cols
            ),
            ViewerError::UnsupportedSource { kind } => {
                write!(f, "{} DEM source is not currently supported", kind)
            }

            ViewerError::EmptyGradient => write!(f, "Color gradient has no stops"),

            ViewerError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),

            ViewerError::IoError { path, error } => write!(f, "IO error for {}: {}", path, error),
            ViewerError::ParseError {
                value,
                expected_type,
            } => write!(
                f,
                "Parse error: '{}' is not a valid {}",
                value, expected_type
            ),
            ViewerError::DeserializationError { context, error } => {
                write!(f, "Deserialization error in {}: {}", context, error)
            }
            ViewerError::StateError { expected, actual } => {
                write!(f, "State error: expected {}, actual {}", expected, actual)
            }
        }
    }
}

impl StdError for ViewerError {}

/// Type alias for Results in the viewer core
pub type ViewerResult<T> = Result<T, ViewerError>;

impl From<std::io::Error> for ViewerError {
    fn from(error: std::io::Error) -> Self {
        ViewerError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ViewerError {
    fn from(error: toml::de::Error) -> Self {
        ViewerError::DeserializationError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<crate::dem::GridParseError> for ViewerError {
    fn from(err: crate::dem::GridParseError) -> Self {
        use crate::dem::GridParseError;
        match err {
            GridParseError::MissingHeader { field } => ViewerError::ParseError {
                value: "<eof>".to_string(),
                expected_type: format!("{} header value", field),
            },
            GridParseError::InvalidHeader { field, value } => ViewerError::ParseError {
                value,
                expected_type: format!("{} header value", field),
            },
            GridParseError::InvalidDimensions { cols, rows } => ViewerError::ParseError {
                value: format!("{}x{}", cols, rows),
                expected_type: "grid dimensions".to_string(),
            },
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_viewer<F>(self, f: F) -> ViewerResult<T>
    where
        F: FnOnce() -> ViewerError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_viewer<F>(self, f: F) -> ViewerResult<T>
    where
        F: FnOnce() -> ViewerError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for attaching a path to IO failures
pub trait ErrorContext<T> {
    fn with_path(self, path: &str) -> ViewerResult<T>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn with_path(self, path: &str) -> ViewerResult<T> {
        self.map_err(|e| ViewerError::IoError {
            path: path.to_string(),
            error: e.to_string(),
        })
    }
}
