pub(crate) mod whisper;

use std::path::Path;

use async_trait::async_trait;

use crate::types::TranscriptionResponse;

/// A speech-to-text backend
///
/// Implementations make exactly one attempt per call: no retries, no backoff.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `path`
    async fn transcribe(&self, path: &Path) -> crate::error::Result<TranscriptionResponse>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}
