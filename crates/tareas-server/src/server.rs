//! `ApiServer` — Axum HTTP server for the task API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use tareas_audit::AuditLog;
use tareas_store::TaskStore;

use crate::config::ServerConfig;
use crate::handlers::{info, stats, tasks};

/// Shared state accessible from Axum handlers.
///
/// The store sits behind an exclusive-access lock so concurrent handlers
/// cannot interleave mutations; each handler holds the guard only for the
/// duration of its store call.
#[derive(Clone)]
pub struct AppState {
    /// The task collection, single-owner behind a lock.
    pub store: Arc<RwLock<TaskStore>>,
    /// Append-only request audit log.
    pub audit: Arc<AuditLog>,
    /// Whether 500 responses carry raw error messages.
    pub dev_mode: bool,
}

/// The task API server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new server owning a fresh store.
    pub fn new(config: ServerConfig, audit: AuditLog) -> Self {
        let state = AppState {
            store: Arc::new(RwLock::new(TaskStore::new())),
            audit: Arc::new(audit),
            dev_mode: config.dev_mode,
        };
        Self { config, state }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(info::api_info))
            .route("/estadisticas", get(stats::estadisticas))
            .route("/tareas", get(tasks::list).post(tasks::create))
            .route(
                "/tareas/{id}",
                get(tasks::get_one)
                    .put(tasks::replace)
                    .patch(tasks::patch_one)
                    .delete(tasks::remove),
            )
            .fallback(info::fallback)
            .with_state(self.state.clone())
    }

    /// Bind and serve until the token is cancelled.
    ///
    /// Returns the bound address (useful with port `0`) and the serve task
    /// handle.
    pub async fn listen(
        &self,
        token: CancellationToken,
    ) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!(%addr, "task API listening");
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(token.cancelled_owned())
                .await
            {
                tracing::error!(%err, "server terminated with error");
            }
        });

        Ok((addr, handle))
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
