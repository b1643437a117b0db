use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription client errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The upload could not be read back from disk
    #[error("Failed to read audio file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Provider rejected the request as malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider rejected the API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned any other non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Client could not be constructed from configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider answered with a body that is not a transcription
    #[error("Internal error")]
    InternalError,
}

impl SttError {
    /// Map a non-success provider response to an error
    pub(crate) fn from_status(status: http::StatusCode, body: String) -> Self {
        match status {
            http::StatusCode::UNAUTHORIZED => Self::AuthenticationFailed(body),
            http::StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            _ => Self::ProviderApiError {
                status: status.as_u16(),
                message: body,
            },
        }
    }

    /// Whether the provider itself answered (as opposed to the call never completing)
    pub const fn is_provider_response(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::AuthenticationFailed(_) | Self::ProviderApiError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[test]
    fn unauthorized_maps_to_authentication_failed() {
        let err = SttError::from_status(StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert!(matches!(err, SttError::AuthenticationFailed(ref m) if m == "bad key"));
        assert!(err.is_provider_response());
    }

    #[test]
    fn bad_request_maps_to_invalid_request() {
        let err = SttError::from_status(StatusCode::BAD_REQUEST, "unsupported file".to_string());
        assert!(matches!(err, SttError::InvalidRequest(_)));
    }

    #[test]
    fn other_statuses_keep_code_and_body() {
        let err = SttError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert_eq!(err.to_string(), "Provider API error (429): slow down");
    }

    #[test]
    fn connection_errors_are_not_provider_responses() {
        assert!(!SttError::ConnectionError("refused".to_string()).is_provider_response());
    }

    #[test]
    fn undecodable_reply_carries_no_details() {
        let err = SttError::InternalError;
        assert_eq!(err.to_string(), "Internal error");
        assert!(!err.is_provider_response());
    }
}
