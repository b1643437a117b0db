use std::path::PathBuf;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use http::StatusCode;
use stt::{AudioFormat, SttError};
use thiserror::Error;

/// Everything that can end an upload request early
///
/// The `Display` text is for logs. Users only ever see [`UploadError::client_message`].
#[derive(Debug, Error)]
pub enum UploadError {
    /// Request was not a readable multipart form
    #[error("malformed multipart request: {0}")]
    Malformed(#[from] MultipartRejection),

    /// Form had no `mp3` file field
    #[error("multipart form has no `mp3` file field")]
    MissingFile,

    /// The upload stream broke or exceeded the body limit
    #[error("failed to read upload stream: {0}")]
    Unreadable(#[source] MultipartError),

    /// Extension is not on the allow-list
    #[error("unsupported audio format: `{filename}`")]
    UnsupportedFormat { filename: String },

    /// Could not write the temp file
    #[error("failed to save upload to {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Provider call failed
    #[error("transcription failed: {0}")]
    Transcription(#[from] SttError),
}

impl UploadError {
    /// HTTP status for the rendered error page
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Malformed(rejection) => rejection.status(),
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Unreadable(err) => err.status(),
            Self::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transcription(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show on the error page
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Malformed(_) | Self::MissingFile => "Failed to get the file".to_string(),
            Self::Unreadable(_) => "Failed to open the file".to_string(),
            Self::UnsupportedFormat { .. } => {
                format!("file format should be only: {}", AudioFormat::allowed_list())
            }
            Self::Storage { .. } => "Failed to save the file".to_string(),
            Self::Transcription(_) => "Failed to transcribe speech".to_string(),
        }
    }

    /// Whether the failure is on our side rather than the client's
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
