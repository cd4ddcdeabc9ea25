//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the OCS handlers
//! - Wire up middleware (tracing)
//! - Answer unknown paths with an OCS "Not Found" envelope
//! - Bind server to listener and stop on shutdown

use std::sync::Arc;

use axum::{extract::State, http::Uri, routing::get, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::OcsServiceConfig;
use crate::http::format::Format;
use crate::http::response::OcsResponse;
use crate::ocs::model::{META_NOT_FOUND, META_OK};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OcsServiceConfig>,
}

/// HTTP server exposing the OCS endpoints.
pub struct HttpServer {
    router: Router,
    config: Arc<OcsServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: OcsServiceConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    fn build_router(config: &OcsServiceConfig, state: AppState) -> Router {
        let prefix = config.ocs.prefix.trim_end_matches('/');
        Router::new()
            .route(&format!("{prefix}/config"), get(get_config))
            .fallback(not_found)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Router with all routes and middleware, for embedding or testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.ocs.prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &OcsServiceConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct ConfigData<'a> {
    version: &'a str,
    website: &'a str,
    host: &'a str,
    contact: &'a str,
    ssl: &'static str,
}

async fn get_config(State(state): State<AppState>, format: Format) -> OcsResponse {
    let ocs = &state.config.ocs;
    let config = ConfigData {
        version: &ocs.version,
        website: &ocs.website,
        host: &ocs.host,
        contact: &ocs.contact,
        ssl: if ocs.ssl { "true" } else { "false" },
    };

    OcsResponse::from_serialize(format, META_OK.clone(), &config)
}

async fn not_found(format: Format, uri: Uri) -> OcsResponse {
    tracing::debug!(path = %uri.path(), "No OCS route matched");
    OcsResponse::data(format, META_NOT_FOUND.clone(), None)
}
