//! Error types for the spacebio core library.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering backend requests, configuration, and clipboard export.

use std::path::PathBuf;

/// Top-level error type for the spacebio core library.
#[derive(Debug, thiserror::Error)]
pub enum SpaceBioError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from calls to the research backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("Backend returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Could not parse response from {endpoint}: {message}")]
    ResponseParse { endpoint: String, message: String },
}

impl ApiError {
    /// The endpoint path (e.g. `/search`) the failing call targeted.
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Request { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::ResponseParse { endpoint, .. } => endpoint,
        }
    }
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// Errors from writing to a clipboard backend.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {message}")]
    Unavailable { message: String },

    #[error("Clipboard write failed: {message}")]
    WriteFailed { message: String },
}

/// A type alias for results using the top-level `SpaceBioError`.
pub type Result<T> = std::result::Result<T, SpaceBioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_api_request() {
        let err = SpaceBioError::Api(ApiError::Request {
            endpoint: "/search".into(),
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "API error: Request to /search failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_api_status() {
        let err = ApiError::Status {
            endpoint: "/gaps".into(),
            status: 500,
            body: "internal".into(),
        };
        assert_eq!(err.to_string(), "Backend returned 500 for /gaps: internal");
        assert_eq!(err.endpoint(), "/gaps");
    }

    #[test]
    fn test_error_display_config() {
        let err = SpaceBioError::Config(ConfigError::Invalid {
            message: "api.top_k must be positive".into(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: api.top_k must be positive"
        );
    }

    #[test]
    fn test_error_display_clipboard() {
        let err = SpaceBioError::Clipboard(ClipboardError::Unavailable {
            message: "no display".into(),
        });
        assert_eq!(
            err.to_string(),
            "Clipboard error: Clipboard unavailable: no display"
        );
    }

    #[test]
    fn test_error_display_config_file_not_found() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("/missing/spacebio.toml"),
        };
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /missing/spacebio.toml"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpaceBioError = io_err.into();
        assert!(matches!(err, SpaceBioError::Io(_)));
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SpaceBioError = serde_err.into();
        assert!(matches!(err, SpaceBioError::Serialization(_)));
    }
}
