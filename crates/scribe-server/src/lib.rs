mod error;
mod health;
mod pages;
mod store;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, extract::DefaultBodyLimit};
use scribe_config::Config;
use stt::Transcriber;
use tower_http::trace::TraceLayer;

pub use error::UploadError;
pub use store::{TempUpload, UploadStore};
pub use views::Views;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the transcription client, upload directory, or
    /// views fail to initialize
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let transcriber = stt::build_transcriber(&config.stt)?;
        Self::with_transcriber(config, transcriber).await
    }

    /// Build the server around an existing transcriber
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be created or the
    /// views fail to load
    pub async fn with_transcriber(config: Config, transcriber: Arc<dyn Transcriber>) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();

        let views = Arc::new(Views::from_config(&config.views)?);
        let store = UploadStore::open(&config.storage.upload_dir).await?;

        tracing::debug!(upload_dir = %store.dir().display(), "upload store ready");

        let mut app = pages::router(pages::AppState {
            views,
            store,
            transcriber,
        });

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Apply middleware layers (innermost first)
        app = app.layer(DefaultBodyLimit::max(config.server.body_limit));
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address)
            .await
            .with_context(|| format!("failed to bind {}", self.listen_address))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
