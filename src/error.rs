//! Error types for the RegexSolver SDK.

use thiserror::Error;

/// Result type for RegexSolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the RegexSolver SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error("The API returned the following error: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message taken from the error body
        message: String,
    },

    /// Local input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    /// Create an API error from a failed response.
    ///
    /// A failure while reading the body is reported as a transport error.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();

        match response.text().await {
            Ok(body) => Self::from_body(status, &body),
            Err(e) => Self::from_transport(e),
        }
    }

    /// Map a `reqwest` failure, keeping timeouts distinct.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err)
        }
    }

    fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|err| err.message)
            .unwrap_or_else(|| "Unknown error".into());

        Error::Api { status, message }
    }

    /// The message carried by an [`Error::Api`], if this is one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            status: 400,
            message: "A random error.".into(),
        };
        assert_eq!(
            err.to_string(),
            "The API returned the following error: A random error."
        );
        assert_eq!(err.api_message(), Some("A random error."));
    }

    #[test]
    fn test_error_body_message() {
        let err = Error::from_body(400, r#"{"message": "Invalid regex.", "code": 3}"#);
        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert_eq!(err.api_message(), Some("Invalid regex."));
    }

    #[test]
    fn test_error_body_fallback_message() {
        let err = Error::from_body(422, r#"{"error": "x"}"#);
        assert_eq!(err.api_message(), Some("Unknown error"));

        let err = Error::from_body(500, "<html>");
        assert_eq!(err.api_message(), Some("Unknown error"));

        let err = Error::from_body(502, "");
        assert_eq!(err.api_message(), Some("Unknown error"));
    }

    #[test]
    fn test_non_api_error_has_no_message() {
        assert!(Error::Timeout.api_message().is_none());
        assert!(Error::Config("missing token".into()).api_message().is_none());
    }
}
