//! Painters Timer - random reference pictures with a practice countdown
//!
//! This is the main entry point for the painters-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use painters_timer::{
    api::create_router,
    config::Config,
    engine::AlarmNotifier,
    services::{CommandPlayer, PictureSource},
    state::{AppState, Session},
    tasks::spawn_event_loop,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("painters_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting painters-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, pictures={}, alarm={} x{}",
        config.host,
        config.port,
        config.pictures.display(),
        config.alarm_sound.display(),
        config.alarm_repeats
    );

    if !config.pictures.is_dir() {
        warn!("Pictures folder {} does not exist, start will only run the timer", config.pictures.display());
    }
    if !config.alarm_sound.is_file() {
        warn!("Alarm sound {} not found, expiry will be silent", config.alarm_sound.display());
    }

    // Session lives in the event loop task from here on
    let pictures = PictureSource::new(&config.pictures);
    let alarm = AlarmNotifier::new(&config.alarm_sound, Box::new(CommandPlayer::new(&config.player)))
        .with_repeats(config.alarm_repeats)
        .with_interval(config.alarm_interval());
    let channels = spawn_event_loop(Session::new(pictures.clone(), alarm));

    let state = Arc::new(
        AppState::new(channels, pictures, config.port, config.host.clone())
            .with_picture_box(config.max_width, config.max_height),
    );

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start        - New picture and countdown {{\"amount\", \"unit\"}}");
    info!("  POST /pause        - Pause countdown, show folders");
    info!("  POST /resume       - Resume countdown, show picture");
    info!("  POST /toggle       - Pause/resume button");
    info!("  POST /view/toggle  - Switch between folders and picture");
    info!("  PUT  /folder       - Select picture folder {{\"path\"}}");
    info!("  GET  /folders      - Folder tree");
    info!("  GET  /picture      - Current picture (PNG)");
    info!("  GET  /status       - Countdown and view status");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
