use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use scribe_config::SttConfig;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::SttError, format::AudioFormat, http_client::http_client, types::TranscriptionResponse,
};

use super::Transcriber;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// MIME type used when the file extension is not a known audio format
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// `OpenAI` Whisper transcription client
pub struct WhisperClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    language: Option<String>,
    prompt: Option<String>,
}

impl WhisperClient {
    /// Build a client from the `[stt]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the timeout is invalid,
    /// or the HTTP client cannot be built
    pub fn from_config(config: &SttConfig) -> crate::error::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SttError::ConfigError("API key required for transcription".to_string()))?;

        let timeout = config
            .timeout_duration()
            .map_err(|e| SttError::ConfigError(e.to_string()))?;

        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_OPENAI_API_URL, url::Url::as_str);

        Ok(Self {
            client: http_client(timeout)?,
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            language: config.language.clone(),
            prompt: config.prompt.clone(),
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn build_form(&self, path: &Path) -> crate::error::Result<reqwest::multipart::Form> {
        let audio = tokio::fs::read(path).await.map_err(|source| SttError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = path
            .file_name()
            .map_or_else(|| "audio".to_string(), |name| name.to_string_lossy().into_owned());

        let content_type = AudioFormat::from_path(path).map_or(FALLBACK_CONTENT_TYPE, AudioFormat::mime_type);

        tracing::debug!(
            "Whisper transcription request: {} bytes, model={}",
            audio.len(),
            self.model,
        );

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename)
            .mime_str(content_type)
            .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        if let Some(prompt) = &self.prompt {
            form = form.text("prompt", prompt.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, path: &Path) -> crate::error::Result<TranscriptionResponse> {
        let form = self.build_form(path).await?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Whisper API error ({status}): {error_text}");

            return Err(SttError::from_status(status, error_text));
        }

        let result: TranscriptionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            SttError::InternalError
        })?;

        tracing::debug!("Whisper transcription complete");

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "whisper"
    }
}
