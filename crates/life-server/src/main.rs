//! HTTP front end that drives a toroidal Game of Life board.

mod api;
mod player;
mod session;
mod telemetry;

use anyhow::Result;
use life_core::ServerConfig;
use session::Session;
use std::sync::Arc;
use tokio::signal;
use tokio::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    telemetry::init_telemetry(config.log_json)?;

    info!(
        "Starting life server on {}:{} with a {}x{} board",
        config.bind_address, config.port, config.grid.width, config.grid.height
    );

    let session = Arc::new(Session::new(&config)?);

    if config.playback.autoplay {
        let report = session.randomize_with(&config.seed)?;
        info!(population = report.changed.len(), "Seeded initial board");
        session.set_playing(true);
    }

    // Start the auto-advance task
    let player = tokio::spawn(player::run_player(
        session.clone(),
        Duration::from_millis(config.playback.tick_interval_ms),
    ));

    let app = api::router(api::AppState { session });

    // Start server
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    player.abort();
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
