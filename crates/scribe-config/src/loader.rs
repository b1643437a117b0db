use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::Config;

/// Environment variable holding the provider API key when the config file has none
pub const API_KEY_ENV: &str = "API_KEY";

/// Routes owned by the upload pages
const RESERVED_PATHS: [&str; 2] = ["/", "/upload"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist and `required` is false
    ///
    /// # Errors
    ///
    /// Returns an error if a present (or required) file fails to load, or
    /// the resulting configuration is invalid
    pub fn load_or_default(path: &Path, required: bool) -> anyhow::Result<Self> {
        if required || path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env_fallbacks();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.apply_env_fallbacks();
        config.validate()?;

        Ok(config)
    }

    /// Fill the API key from `API_KEY` when the file left it out
    fn apply_env_fallbacks(&mut self) {
        if self.stt.api_key.is_none() {
            self.stt.api_key = std::env::var(API_KEY_ENV).ok().map(SecretString::from);
        }
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider credential is missing or any
    /// section holds an out-of-range value
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_stt_config()?;
        self.validate_server_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_stt_config(&self) -> anyhow::Result<()> {
        let has_key = self
            .stt
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());

        if !has_key {
            anyhow::bail!("no transcription API key: set stt.api_key or the {API_KEY_ENV} environment variable");
        }

        if self.stt.model.trim().is_empty() {
            anyhow::bail!("stt.model must not be empty");
        }

        self.stt.timeout_duration()?;

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        let health = &self.server.health;
        if health.enabled {
            if !health.path.starts_with('/') {
                anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
            }
            if RESERVED_PATHS.contains(&health.path.as_str()) {
                anyhow::bail!("server.health.path `{}` collides with an upload route", health.path);
            }
        }

        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(rate) = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate)
        else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        Ok(())
    }
}
