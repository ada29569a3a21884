mod api;
mod app;
mod config;
mod error;
mod middleware;
mod model;
mod repo;
mod service;
mod util;

use anyhow::Context;
use std::{net::SocketAddr, path::Path, sync::OnceLock};
use tokio::net::TcpListener;
use tracing_appender::{non_blocking::NonBlocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::filter_fn, fmt::layer as fmt_layer, prelude::*, EnvFilter, Registry,
};

/// Events from this crate also go to the log file; dependency noise stays on stdout.
const CRATE_TARGET: &str = "hype_check";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid server bind address {:?}", config.server.bind))?;

    let app = app::build_router(&config).await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "hype-check listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("hype-check stopped");
    Ok(())
}

fn init_logging(logging: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.level.as_deref().unwrap_or("info"))
    });

    let (file_writer, guard) = log_file_writer(Path::new(&logging.file))?;
    let _ = LOG_GUARD.set(guard);

    let ours = filter_fn(|meta| meta.target().starts_with(CRATE_TARGET));
    let theirs = filter_fn(|meta| !meta.target().starts_with(CRATE_TARGET));

    Registry::default()
        .with(env_filter)
        .with(
            fmt_layer()
                .with_writer(std::io::stdout)
                .with_file(true)
                .with_line_number(true)
                .with_filter(ours.clone()),
        )
        .with(fmt_layer().with_writer(std::io::stdout).with_filter(theirs))
        .with(
            fmt_layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(ours),
        )
        .try_init()
        .context("failed to init tracing subscriber")?;

    Ok(())
}

fn log_file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {:?}", directory))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path {:?} has no file name", path))?;

    Ok(tracing_appender::non_blocking(rolling::never(
        directory, file_name,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
