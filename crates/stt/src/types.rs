use serde::{Deserialize, Serialize};

/// Transcription result following the `OpenAI` audio API format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed text
    pub text: String,
}
