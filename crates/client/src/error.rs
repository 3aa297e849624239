//! Error types for the Shiptalk client.

use shiptalk_core::FieldErrors;
use thiserror::Error;

/// Errors that can occur when talking to the experts API.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error (network failure, DNS resolution, timeout, etc.).
    #[error("connection error: {0}")]
    Connection(String),

    /// The API answered with an envelope that is not `success: true`.
    #[error("{message}")]
    Api {
        /// User-facing message from the envelope, or the operation's fallback.
        message: String,
    },

    /// The response body was not a usable JSON envelope.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Text for the single notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the API rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// Why a form submission did not reach the API or did not succeed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another submission from the same form is still in flight.
    #[error("a submission is already in progress")]
    Busy,

    /// One or more fields failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] FieldErrors),

    /// The request was sent and failed.
    #[error(transparent)]
    Operation(#[from] Error),
}

impl SubmitError {
    /// Field errors, if validation failed.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiptalk_core::Field;

    #[test]
    fn api_error_displays_message_only() {
        let err = Error::Api {
            message: "Expert not found".to_string(),
        };
        assert_eq!(err.to_string(), "Expert not found");
        assert_eq!(err.user_message(), "Expert not found");
        assert!(err.is_api_error());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn connection_error_message() {
        let err = Error::Connection("timeout".to_string());
        assert!(err.is_connection_error());
        assert_eq!(err.user_message(), "connection error: timeout");
    }

    #[test]
    fn submit_error_from_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Phone, "Phone number must be 10 digits");
        let err = SubmitError::from(errors);
        assert!(err.field_errors().is_some_and(|e| e.contains(Field::Phone)));
        assert_eq!(
            err.to_string(),
            "validation failed: phone: Phone number must be 10 digits"
        );
    }

    #[test]
    fn submit_error_from_operation() {
        let err = SubmitError::from(Error::Deserialization("not json".to_string()));
        assert!(err.field_errors().is_none());
        assert_eq!(err.to_string(), "failed to deserialize response: not json");
    }
}
