//! HTTP Server

use crate::routes::router;
use crate::state::SharedState;
use mindful_core::application::ShutdownToken;
use mindful_core::error::{AppError, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Bound HTTP server, ready to serve
pub struct HttpServer {
    listener: TcpListener,
    state: SharedState,
}

impl HttpServer {
    /// Bind the listening socket (port 0 picks a free port)
    pub async fn bind(config: &HttpServerConfig, state: SharedState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| AppError::Internal(format!("Failed to read local address: {}", e)))
    }

    /// Serve until the shutdown token fires, then drain in-flight requests
    pub async fn run(self, mut shutdown: ShutdownToken) -> Result<()> {
        let addr = self.local_addr()?;
        info!(%addr, "HTTP server listening");

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await
            .map_err(|e| AppError::Internal(format!("HTTP server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
