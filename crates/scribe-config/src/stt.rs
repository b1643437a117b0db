use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Model sent to the provider when none is configured
pub const DEFAULT_STT_MODEL: &str = "whisper-1";

/// Transcription provider configuration
///
/// The provider speaks the `OpenAI` audio transcription API.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// API key; falls back to the `API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (defaults to `https://api.openai.com/v1`)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Optional language hint (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,
    /// Optional prompt to guide transcription
    #[serde(default)]
    pub prompt: Option<String>,
    /// Request timeout (e.g. "90s", "2m"); no timeout when unset
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            language: None,
            prompt: None,
            timeout: None,
        }
    }
}

impl SttConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timeout is not a valid duration
    pub fn timeout_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|s| duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid stt.timeout '{s}': {e}")))
            .transpose()
    }
}

fn default_model() -> String {
    DEFAULT_STT_MODEL.to_string()
}
