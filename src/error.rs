// src/error.rs
// =============================================================================
// Error type shared by the library.
//
// Nothing in the library rethrows these to the page: the loader and menu
// renderer turn them into inline messages, the API helpers into `None`.
// They still exist as real types so each boundary can log what went wrong.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid fragment path: {path}")]
    InvalidPath { path: String },

    #[error("{message}")]
    InvalidFormat { message: String },
}

impl ClientError {
    /// Builds a `Status` error from a reqwest status code.
    pub fn status(code: reqwest::StatusCode) -> Self {
        ClientError::Status {
            status: code.as_u16(),
            reason: code.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ClientError::status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_invalid_format_is_bare_message() {
        let err = ClientError::InvalidFormat {
            message: "Invalid response format from API".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid response format from API");
    }
}
