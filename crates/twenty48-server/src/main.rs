use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twenty48_server::app::{AppState, build_router};
use twenty48_server::args::Args;
use twenty48_server::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args).context("failed to load configuration")?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_settings(&config.game);
    let static_dir = config.server.static_dir.as_deref();
    if let Some(dir) = static_dir {
        if !dir.is_dir() {
            warn!("static dir" = %dir.display(), "not a directory; static requests will 404");
        }
        info!("serving static files" = %dir.display());
    }
    let router = build_router(state, static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid host/port combination")?;
    info!(
        "listening" = %addr,
        "seeded" = config.game.seed.is_some(),
        "lock_finished" = config.game.lock_finished
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
