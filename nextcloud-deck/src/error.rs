//! Error types for the Deck connector

use thiserror::Error;

/// Result type for connector operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that can occur while talking to the Deck API
#[derive(Debug, Error)]
pub enum DeckError {
    /// HTTP 401 from any surface
    #[error("authentication failed: {message}. Check your credentials or create an app password")]
    AuthenticationFailed { message: String },

    /// HTTP 403
    #[error("access denied: {message}")]
    AccessDenied { message: String },

    /// HTTP 404, or a get-single that found nothing in the fetched collection
    #[error("resource not found: {message}")]
    ResourceNotFound { message: String },

    /// Any other non-2xx, with the message extracted from the error envelope
    #[error("remote API error ({status}): {message}")]
    RemoteApi { status: u16, message: String },

    /// A selector resolved to a non-numeric value where a numeric ID was required.
    /// Terminal for the input row - never retried.
    #[error("invalid identifier: {value:?} is not a numeric ID")]
    InvalidIdentifier { value: String },

    /// A (resource, operation) pair with no matching handler
    #[error("unknown operation '{operation}' for resource '{resource}'")]
    UnknownOperation { resource: String, operation: String },

    /// A required input parameter was not supplied
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    /// A parameter was supplied but could not be used
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Credentials or server URL could not be assembled
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Network or connection failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeckError {
    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            message: message.into(),
        }
    }

    /// Create an invalid-identifier error
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }

    /// Create a missing-parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an invalid-parameter error
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::invalid_identifier("abc");
        assert_eq!(err.to_string(), "invalid identifier: \"abc\" is not a numeric ID");
    }

    #[test]
    fn test_auth_error_mentions_app_password() {
        let err = DeckError::AuthenticationFailed {
            message: "invalid username or password".into(),
        };
        assert!(err.to_string().contains("app password"));
    }

    #[test]
    fn test_unknown_operation_display() {
        let err = DeckError::UnknownOperation {
            resource: "board".into(),
            operation: "archive".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown operation 'archive' for resource 'board'"
        );
    }
}
