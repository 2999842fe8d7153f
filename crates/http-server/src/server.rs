//! HTTP server startup

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::{router, AppState};

/// HTTP server wrapper
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Router with all routes and layers applied
    pub fn router(&self) -> axum::Router {
        router(self.state.clone(), &self.config)
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown: tokio::sync::oneshot::Receiver<()>,
    ) -> anyhow::Result<()> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        info!(
            "Starting HTTP server on {} (with graceful shutdown)",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                shutdown.await.ok();
                info!("Shutdown signal received");
            })
            .await?;

        Ok(())
    }

    /// Get server address
    pub fn address(&self) -> String {
        self.config.address()
    }
}

/// Builder for server configuration
pub struct HttpServerBuilder {
    config: ServerConfig,
    state: AppState,
}

impl HttpServerBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            config: ServerConfig::default(),
            state,
        }
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn cors_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.cors_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> HttpServer {
        HttpServer::new(self.config, self.state)
    }
}
