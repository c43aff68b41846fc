use std::io;

use clap::Parser;
use server::{AppContext, Config};
use tokio::signal::unix::SignalKind;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    info!(?config, "Starting Joke Server");
    if !config.csrf_enforce {
        warn!("CSRF enforcement disabled, unsafe requests are accepted without a token");
    }

    if let Err(error) = setup_app(config).await {
        error!(?error, "App server error");
        std::process::exit(1);
    }
    Ok(())
}

async fn shutdown_signal() {
    async fn terminate() -> io::Result<()> {
        tokio::signal::unix::signal(SignalKind::terminate())?
            .recv()
            .await;
        Ok(())
    }
    tokio::select! {
        _ = terminate() => {},
        _ = tokio::signal::ctrl_c() => {},
    }
    info!("Shutdown signal received, starting graceful shutdown")
}

async fn setup_app(config: Config) -> anyhow::Result<()> {
    let bind = config.bind;
    let app = server::app(AppContext::new(config)?);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(bind_address = %bind, "HTTP server listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server shutdown complete");
    Ok(())
}
