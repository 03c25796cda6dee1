// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `glow serve` implementation.
//!
//! Wires the upstream transport, catalog service, local store, metrics
//! recorder and HTTP gateway together, then serves until SIGINT/SIGTERM.

use std::path::Path;
use std::sync::Arc;

use glow_catalog::CatalogService;
use glow_config::GlowConfig;
use glow_core::{GlowError, PluginAdapter};
use glow_gateway::GatewayState;
use glow_prometheus::PrometheusAdapter;
use glow_resilience::HttpTransport;
use glow_store::LocalStore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs the `glow serve` command.
pub async fn run_serve(config: GlowConfig) -> Result<(), GlowError> {
    init_tracing(&config.server.log_level);

    info!(
        upstream = %config.upstream.url,
        fresh_ttl_secs = config.cache.fresh_ttl_secs,
        stale_ttl_secs = config.cache.stale_ttl_secs,
        "starting glow"
    );

    let metrics = if config.metrics.enabled {
        match PrometheusAdapter::install() {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                warn!(error = %e, "metrics disabled: recorder install failed");
                None
            }
        }
    } else {
        None
    };

    ensure_parent_dir(&config.store.database_path)?;
    let store = Arc::new(LocalStore::open(&config.store).await?);

    let transport = Arc::new(HttpTransport::new(&config.upstream)?);
    let catalog = Arc::new(CatalogService::from_config(transport, &config));

    let mut state = GatewayState::new(catalog, store.clone());
    if let Some(adapter) = metrics {
        state = state.with_metrics(Arc::new(move || adapter.render()));
    }

    let cancel = install_signal_handler();
    let served = glow_gateway::start_server(&config.server, state, cancel).await;

    if let Err(e) = store.shutdown().await {
        error!(error = %e, "store shutdown failed");
    }
    info!("glow stopped");
    served
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "glow={log_level},glow_catalog={log_level},glow_resilience={log_level},\
             glow_gateway={log_level},glow_store={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn ensure_parent_dir(database_path: &str) -> Result<(), GlowError> {
    if database_path == ":memory:" {
        return Ok(());
    }
    match Path::new(database_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| GlowError::Storage {
                source: Box::new(e),
            })
        }
        _ => Ok(()),
    }
}

/// Cancel the returned token on SIGINT or SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                        _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "SIGTERM handler unavailable, listening for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        trigger.cancel();
    });

    token
}
