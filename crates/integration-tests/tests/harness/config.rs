//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use secrecy::SecretString;
use scribe_config::{Config, HealthConfig, ServerConfig, StorageConfig, SttConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder storing uploads in `upload_dir`
    pub fn new(upload_dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                storage: StorageConfig {
                    upload_dir: upload_dir.to_path_buf(),
                },
                stt: SttConfig {
                    api_key: Some(SecretString::from("test-key")),
                    ..SttConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the transcription client at a mock backend
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.stt.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Send a language hint with every request
    pub fn with_language(mut self, language: &str) -> Self {
        self.config.stt.language = Some(language.to_owned());
        self
    }

    /// Cap the request body size
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.config.server.body_limit = bytes;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
