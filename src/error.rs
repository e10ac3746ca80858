//! Error types for the dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! Every render is all-or-nothing: any of these aborts the current page.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Source table could not be loaded or parsed
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Hand-authored annotation with an unparseable date
    #[error("Invalid annotation date {date:?}: {reason}")]
    AnnotationDate { date: String, reason: String },

    /// Page selector outside the known pages
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::AnnotationDate {
            date: "Feb 30, 2007".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert!(err.to_string().contains("Feb 30, 2007"));

        let err = DashboardError::UnknownPage("Page 9".to_string());
        assert_eq!(err.to_string(), "Unknown page: Page 9");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
