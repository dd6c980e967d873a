//! Error types for amrscope.
//!
//! The dataset engine itself (filter bookkeeping, rule lookup, projection,
//! aggregation) is total and never produces an error. Errors only arise at
//! the edges: loading configuration, talking to a remote catalog endpoint,
//! and writing export artifacts.
//!
//! # Example
//!
//! ```rust
//! use amrscope::errors::Error;
//!
//! let err = Error::configuration("rate_ceiling must be positive");
//! assert_eq!(err.category(), "Config");
//! assert!(err.is_user_fixable());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for amrscope operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or value errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// Input validation errors (bad CLI selectors, malformed rule tables)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote catalog endpoint errors
    #[error("Remote catalog error: {0}")]
    Remote(String),

    /// Export format that only the rendering layer can produce
    #[error("Export format '{format}' requires a chart renderer and is not produced by the engine")]
    UnsupportedExport { format: String },

    /// Unknown dashboard view
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path context.
    pub fn configuration_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a remote catalog error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Create an unsupported export error.
    pub fn unsupported_export(format: impl Into<String>) -> Self {
        Self::UnsupportedExport {
            format: format.into(),
        }
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Configuration { path, .. } => path.as_ref(),
            _ => None,
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } | Self::Toml(_) => "Config",
            Self::Validation(_) | Self::UnknownView(_) => "Validation",
            Self::Remote(_) => "Remote",
            Self::UnsupportedExport { .. } => "Export",
            Self::Io(_) => "I/O",
            Self::Json(_) => "JSON",
        }
    }

    /// Whether the user can fix this error by changing input or config.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::Toml(_)
                | Self::Validation(_)
                | Self::UnknownView(_)
                | Self::UnsupportedExport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(Error::configuration("x").category(), "Config");
        assert_eq!(Error::validation("x").category(), "Validation");
        assert_eq!(Error::remote("x").category(), "Remote");
        assert_eq!(Error::unsupported_export("png").category(), "Export");
    }

    #[test]
    fn test_configuration_with_path() {
        let err = Error::configuration_with_path("bad", "/tmp/.amrscope.toml");
        assert_eq!(
            err.path().map(|p| p.display().to_string()),
            Some("/tmp/.amrscope.toml".to_string())
        );
    }

    #[test]
    fn test_user_fixable_classification() {
        assert!(Error::unsupported_export("pdf").is_user_fixable());
        assert!(!Error::remote("connection refused").is_user_fixable());
        let io = Error::from(std::io::Error::other("disk"));
        assert!(!io.is_user_fixable());
    }

    #[test]
    fn test_unsupported_export_message() {
        let err = Error::unsupported_export("svg");
        assert!(err.to_string().contains("'svg'"));
    }
}
