use std::io;

use thiserror::Error;

/// Slack error code reported when the target message no longer exists.
pub const MESSAGE_NOT_FOUND_CODE: &str = "message_not_found";

/// Library-wide error type for pr-notifier operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Missing or invalid configuration.
    #[error("{0}")]
    Configuration(String),

    /// Webhook payload lacks required fields or is not valid JSON.
    #[error("Malformed event payload: {0}")]
    MalformedEvent(String),

    /// Network-level failure talking to a host.
    #[error("{host} request failed: {message}")]
    Transport { host: &'static str, message: String },

    /// Host answered with a body of an unexpected shape.
    #[error("Unexpected {host} response: {details}")]
    UnexpectedResponse { host: &'static str, details: String },

    /// Slack reported an application-level failure.
    #[error("Slack API error: {code}")]
    ChatApi { code: String },

    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    ReviewHostApi { status: u16, message: String },

    /// Correlation store backend failure.
    #[error("Correlation store error: {0}")]
    Store(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Internal failure unrelated to user input.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether the chat host reported that the message is already gone.
    pub fn is_message_not_found(&self) -> bool {
        matches!(self, AppError::ChatApi { code } if code == MESSAGE_NOT_FOUND_CODE)
    }

    /// Whether the error came from a response body that could not be interpreted.
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self, AppError::UnexpectedResponse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_not_found_is_classified() {
        let err = AppError::ChatApi { code: "message_not_found".into() };
        assert!(err.is_message_not_found());

        let other = AppError::ChatApi { code: "channel_not_found".into() };
        assert!(!other.is_message_not_found());
    }

    #[test]
    fn display_includes_host_details() {
        let err = AppError::ReviewHostApi { status: 404, message: "Not Found".into() };
        assert_eq!(err.to_string(), "GitHub API error (404): Not Found");
    }
}
