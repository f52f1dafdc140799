// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP surface of the store.
//!
//! | Method | Path                    | Body          | Response                          |
//! |--------|-------------------------|---------------|-----------------------------------|
//! | GET    | `/api/ledstrips`        | none          | the strip list                    |
//! | POST   | `/api/ledstrips/update` | a strip list  | `{"status": "ok", "updated": [..]}` |
//!
//! Errors are answered with `{"error": .., "message": ..}`: 400 for
//! malformed JSON, 422 for a body of the wrong shape or one the validation
//! policy rejects, and 500 when the data file cannot be written.

mod config;
mod response;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use config::{ServerConfig, ValidationMode};
pub use response::{ApiError, ErrorBody, UpdateResponse};
pub use routes::{STRIPS_PATH, UPDATE_PATH, router};

use crate::error::{Error, Result};
use crate::store::StripStore;

/// The LED-strip HTTP server.
///
/// # Examples
///
/// ```no_run
/// use ledstrip_store::server::{LedStripServer, ServerConfig};
///
/// # #[tokio::main]
/// # async fn main() -> ledstrip_store::Result<()> {
/// let server = LedStripServer::new(ServerConfig::default().with_port(8000));
/// server.run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LedStripServer {
    config: ServerConfig,
    store: Arc<StripStore>,
}

impl LedStripServer {
    /// Creates a server holding the seeded strips.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store = StripStore::seeded(config.sink()).with_policy(config.validation().policy());
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Creates a server over an existing store.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<StripStore>) -> Self {
        Self { config, store }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the shared store.
    #[must_use]
    pub fn store(&self) -> &Arc<StripStore> {
        &self.store
    }

    /// Builds the router, with CORS applied if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if an allowed origin is not a valid header
    /// value.
    pub fn app(&self) -> Result<Router> {
        let app = router(Arc::clone(&self.store));
        if !self.config.enable_cors() {
            return Ok(app);
        }

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        let origins = self.config.allowed_origins();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            return Ok(app.layer(cors.allow_origin(Any)));
        }

        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| Error::Server(format!("invalid origin {origin}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(app.layer(cors.allow_origin(origins)))
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if the address is invalid, cannot be bound,
    /// or the server fails while running.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_address()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("failed to bind {addr}: {e}")))?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] if the router cannot be built or the server
    /// fails while running.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app()?;
        let local: Option<SocketAddr> = listener.local_addr().ok();
        tracing::info!(
            address = ?local,
            data_file = %self.store.sink_description(),
            validation = ?self.config.validation(),
            "LED strip server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| Error::Server(format!("server error: {e}")))?;

        tracing::info!("LED strip server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_server_starts_from_seed() {
        let server = LedStripServer::new(ServerConfig::default().with_persistence(false));
        assert_eq!(server.store().sink_description(), "memory");
        assert_eq!(server.config().port(), ServerConfig::DEFAULT_PORT);
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        let config = ServerConfig::default()
            .with_persistence(false)
            .with_cors(true)
            .with_allowed_origins(vec!["bad\norigin".to_string()]);
        let server = LedStripServer::new(config);
        assert!(matches!(server.app(), Err(Error::Server(_))));
    }

    #[test]
    fn cors_accepts_listed_origins() {
        let config = ServerConfig::default()
            .with_persistence(false)
            .with_cors(true)
            .with_allowed_origins(vec!["http://localhost:3000".to_string()]);
        assert!(LedStripServer::new(config).app().is_ok());
    }
}
