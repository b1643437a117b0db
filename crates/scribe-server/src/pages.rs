use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use http::StatusCode;
use stt::{AudioFormat, Transcriber};

use crate::{error::UploadError, store::UploadStore, views::Views};

/// Multipart field carrying the audio, whatever its actual format
const UPLOAD_FIELD: &str = "mp3";

/// Read-only state shared by every request
#[derive(Clone)]
pub(crate) struct AppState {
    pub views: Arc<Views>,
    pub store: UploadStore,
    pub transcriber: Arc<dyn Transcriber>,
}

/// Routes for the upload form and the upload endpoint
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    state.views.index()
}

async fn upload(State(state): State<AppState>, multipart: Result<Multipart, MultipartRejection>) -> Response {
    match transcribe_upload(&state, multipart).await {
        Ok(text) => (StatusCode::OK, state.views.result(&text)).into_response(),
        Err(err) => {
            if err.is_server_error() {
                tracing::error!(error = %err, "upload failed");
            } else {
                tracing::warn!(error = %err, "upload rejected");
            }

            (err.status_code(), state.views.error(&err.client_message())).into_response()
        }
    }
}

/// An audio file pulled out of the form
struct Upload {
    filename: String,
    format: AudioFormat,
    bytes: Bytes,
}

async fn transcribe_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, UploadError> {
    let upload = read_upload(multipart?).await?;

    let temp = state.store.persist(upload.format, &upload.bytes).await?;

    tracing::info!(
        filename = %upload.filename,
        format = %upload.format,
        bytes = upload.bytes.len(),
        path = %temp.path().display(),
        provider = state.transcriber.name(),
        "transcribing upload"
    );

    let result = state.transcriber.transcribe(temp.path()).await;
    temp.discard().await;

    let response = result.inspect_err(|e| {
        tracing::debug!(provider_responded = e.is_provider_response(), "transcription attempt failed");
    })?;

    Ok(response.text)
}

/// Find the upload field and check its extension before reading the body
async fn read_upload(mut multipart: Multipart) -> Result<Upload, UploadError> {
    while let Some(field) = multipart.next_field().await.map_err(UploadError::Unreadable)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::MissingFile)?
            .to_string();

        let format = AudioFormat::from_filename(&filename).ok_or_else(|| UploadError::UnsupportedFormat {
            filename: filename.clone(),
        })?;

        let bytes = field.bytes().await.map_err(UploadError::Unreadable)?;

        return Ok(Upload {
            filename,
            format,
            bytes,
        });
    }

    Err(UploadError::MissingFile)
}
