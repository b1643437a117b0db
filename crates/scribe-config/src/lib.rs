#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod storage;
pub mod stt;
pub mod telemetry;
pub mod views;

use serde::Deserialize;

pub use loader::API_KEY_ENV;
pub use server::*;
pub use storage::*;
pub use stt::*;
pub use telemetry::TelemetryConfig;
pub use views::*;

/// Top-level Scribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Temporary upload storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTML view templates
    #[serde(default)]
    pub views: ViewsConfig,
    /// Transcription provider configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
