//! # tareas-api
//!
//! Task API server binary — loads settings, wires the audit log into the
//! HTTP server, and runs until a shutdown signal arrives.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tareas_audit::AuditLog;
use tareas_server::{ApiServer, ServerConfig, ShutdownCoordinator};
use tareas_settings::{Settings, load_settings_from_path, settings_path};

/// Task API server.
#[derive(Parser, Debug)]
#[command(name = "tareas-api", about = "Servidor de la API de gestión de tareas")]
struct Cli {
    /// Host to bind (overrides settings if specified).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings if specified).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the settings file (defaults to `./tareas.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the audit log file (overrides settings if specified).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Development mode: 500 responses carry raw error messages.
    #[arg(long)]
    dev: bool,
}

impl Cli {
    /// Fold CLI flags over loaded settings; flags win.
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(log_file) = &self.log_file {
            settings.audit.log_path = log_file.to_string_lossy().into_owned();
        }
        if self.dev {
            settings.server.dev_mode = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Cli::parse();

    let config_path = args.config.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings_from_path(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    args.apply(&mut settings);

    let audit = AuditLog::new(PathBuf::from(&settings.audit.log_path));
    tracing::info!(path = %audit.path().display(), "audit log target");

    let config = ServerConfig {
        host: settings.server.host.clone(),
        port: settings.server.port,
        dev_mode: settings.server.dev_mode,
    };
    if config.dev_mode {
        tracing::warn!("dev mode enabled: internal error messages are exposed");
    }

    let server = ApiServer::new(config, audit);
    let coordinator = ShutdownCoordinator::new();
    let (addr, handle) = server
        .listen(coordinator.token())
        .await
        .context("Failed to bind server")?;

    tracing::info!("Task API listening on http://{addr}");

    wait_for_signal().await;

    tracing::info!("Shutting down...");
    coordinator.shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(%err, "failed to listen for ctrl-c");
                }
                return;
            }
        };
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    tracing::error!(%err, "failed to listen for ctrl-c");
                }
            }
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_defaults_to_settings_driven_values() {
        let cli = Cli::parse_from(["tareas-api"]);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert_eq!(cli.config, None);
        assert!(!cli.dev);
    }

    #[test]
    fn cli_custom_host_and_port() {
        let cli = Cli::parse_from(["tareas-api", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn cli_flags_override_settings() {
        let cli = Cli::parse_from([
            "tareas-api",
            "--port",
            "4000",
            "--dev",
            "--log-file",
            "/tmp/audit.log",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.server.port, 4000);
        assert!(settings.server.dev_mode);
        assert_eq!(settings.audit.log_path, "/tmp/audit.log");
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn cli_without_flags_leaves_settings_alone() {
        let cli = Cli::parse_from(["tareas-api"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.server.dev_mode);
    }
}
