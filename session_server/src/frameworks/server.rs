// Framework bootstrap for the session server runtime.

use crate::domain::{SessionLayout, SessionTuning};
use crate::frameworks::{config, level};
use crate::interface_adapters::clients::telemetry::HttpTelemetrySink;
use crate::interface_adapters::net::{
    physics_handler, primary_action_handler, release_handler, status_handler,
};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::status::status_watcher;
use crate::use_cases::{SessionController, SessionEvent, TelemetryReporter, session_task};

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, mpsc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/input/primary", post(primary_action_handler))
        .route("/input/release", post(release_handler))
        .route("/physics", post(physics_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    // build state
    let state = build_state()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn load_layout() -> Result<SessionLayout> {
    match config::level_file() {
        Some(path) => {
            let layout = level::load_layout(&path).map_err(std::io::Error::other)?;
            tracing::info!(path = %path.display(), "level layout loaded");
            Ok(layout)
        }
        None => Ok(SessionLayout::demo()),
    }
}

fn build_state() -> Result<Arc<AppState>> {
    let telemetry_url = config::telemetry_url();
    let telemetry_timeout = config::telemetry_timeout();
    let sink = HttpTelemetrySink::new(telemetry_url.clone(), telemetry_timeout).map_err(|e| {
        std::io::Error::other(format!("failed to initialize telemetry client: {e}"))
    })?;
    tracing::debug!(
        telemetry_url = %telemetry_url,
        telemetry_timeout_ms = telemetry_timeout.as_millis(),
        "telemetry client configured"
    );

    let controller = SessionController::new(
        load_layout()?,
        SessionTuning::default(),
        TelemetryReporter::new(Arc::new(sink)),
    )
    .map_err(|e| std::io::Error::other(format!("invalid session layout: {e}")))?;
    let state_rx = controller.subscribe();

    // The session task is the only writer of session state.
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(config::EVENT_CHANNEL_CAPACITY);
    tokio::spawn(session_task(
        controller,
        event_rx,
        config::TICK_INTERVAL,
        Arc::new(Notify::new()),
    ));
    tokio::spawn(status_watcher(state_rx.clone()));

    Ok(Arc::new(AppState { event_tx, state_rx }))
}
