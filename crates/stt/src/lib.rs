#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Speech-to-text client
//!
//! Wraps one outbound call to an `OpenAI`-compatible transcription API.

mod error;
mod format;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

pub use error::{Result, SttError};
pub use format::AudioFormat;
pub use provider::{Transcriber, whisper::WhisperClient};
pub use types::TranscriptionResponse;

/// Build the transcriber described by the `[stt]` configuration
///
/// # Errors
///
/// Returns an error if the client fails to initialize
pub fn build_transcriber(config: &scribe_config::SttConfig) -> anyhow::Result<Arc<dyn Transcriber>> {
    let client = WhisperClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize transcription client: {e}"))?;

    tracing::debug!(endpoint = client.endpoint(), model = %config.model, "transcription client initialized");

    Ok(Arc::new(client))
}
