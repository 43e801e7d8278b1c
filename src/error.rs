//! Error types for imagesc.
//!
//! A single error enum covers option validation, shape checks, input parsing
//! and the filesystem side of figure saving and web export.

use thiserror::Error;

/// The main error type for imagesc operations.
#[derive(Error, Debug)]
pub enum ImagescError {
    /// Label sequence length disagrees with the matrix dimension
    #[error("Shape mismatch on {axis}: expected {expected} labels, got {actual}")]
    ShapeMismatch {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Matrix without rows or columns
    #[error("Empty matrix: shape ({rows}, {cols})")]
    EmptyMatrix { rows: usize, cols: usize },

    /// Option value outside its documented type or domain (strict mode)
    #[error("Invalid option: {option} - {message}")]
    InvalidOption { option: String, message: String },

    /// Malformed input values
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors reported by an external renderer or figure
    #[error("Render error: {message}")]
    Render { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ImagescError {
    pub(crate) fn invalid_option(option: &str, message: impl Into<String>) -> Self {
        ImagescError::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with ImagescError
pub type Result<T> = std::result::Result<T, ImagescError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ImagescError::ShapeMismatch {
            axis: "rows",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch on rows: expected 3 labels, got 2"
        );

        let err = ImagescError::invalid_option("dpi", "must be positive");
        assert_eq!(err.to_string(), "Invalid option: dpi - must be positive");
    }
}
