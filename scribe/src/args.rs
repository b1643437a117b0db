use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "scribe.toml";

/// Scribe: upload audio, get text back
#[derive(Debug, Parser)]
#[command(name = "scribe", about = "Web front-end for speech-to-text transcription")]
pub struct Args {
    /// Path to configuration file; optional unless given explicitly
    #[arg(short, long, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the dotenv file holding the provider credential
    #[arg(long, default_value = ".env", env = "SCRIBE_ENV_FILE")]
    pub env_file: PathBuf,

    /// Override the listen address
    #[arg(long, env = "SCRIBE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive (e.g. `info`, `scribe_server=debug`)
    #[arg(long, default_value = "info", env = "SCRIBE_LOG")]
    pub log: String,
}

impl Args {
    /// Config path to load and whether it must exist
    pub fn config_path(&self) -> (PathBuf, bool) {
        self.config
            .clone()
            .map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_PATH), false), |path| (path, true))
    }
}
