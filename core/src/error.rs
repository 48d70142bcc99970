//! Error types for the CountriesDB validator client.
//!
//! # Design
//! A code that is well formed but not a real country or subdivision is not an
//! error: it comes back as a `ValidationResult` with `valid: false`. Errors are
//! reserved for bad configuration, malformed batch input, transport failures
//! and non-2xx responses.
//!
//! Server errors are split in two. When the error body carries a non-empty
//! `message`, `Api` displays that message verbatim so callers can show it to
//! users as-is. Everything else lands in `Http` with only the status code.

/// Errors returned by `Validator`, `ApiClient` and `Transport` implementations.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The validator could not be constructed, e.g. a blank API key.
    #[error("countriesdb: {0}")]
    Configuration(String),

    /// Batch input failed the client-side shape check. No request was sent.
    #[error("{0}")]
    Format(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A successful response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The HTTP exchange failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for the server.
    #[error("request timed out")]
    Timeout,

    /// The caller cancelled the request while it was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// The server returned status >= 400 with an error message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server returned status >= 400 without a usable error body.
    #[error("countriesdb: http {status}")]
    Http { status: u16 },
}

impl ValidatorError {
    /// HTTP status of a server-side error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ValidatorError::Api { status, .. } | ValidatorError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ValidatorError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_verbatim() {
        let err = ValidatorError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn http_error_displays_status() {
        let err = ValidatorError::Http { status: 500 };
        assert_eq!(err.to_string(), "countriesdb: http 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn configuration_error_is_prefixed() {
        let err = ValidatorError::Configuration("api key is required".to_string());
        assert_eq!(err.to_string(), "countriesdb: api key is required");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn cancelled_is_flagged() {
        assert!(ValidatorError::Cancelled.is_cancelled());
        assert!(!ValidatorError::Timeout.is_cancelled());
    }
}
