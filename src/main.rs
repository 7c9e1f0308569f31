// Main entry point - Dependency injection and service wiring
use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use battery_dashboard::application::dashboard_controller::DashboardController;
use battery_dashboard::application::dashboard_store::DashboardStore;
use battery_dashboard::infrastructure::config::{AppConfig, load_app_config};
use battery_dashboard::infrastructure::http_repository::HttpBatteryRepository;
use battery_dashboard::presentation::app_state::AppState;
use battery_dashboard::presentation::handlers::{
    get_chart, get_dashboard, health_check, set_timeframe, toggle_auto_refresh,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (to get the log level)
    let config = load_app_config()?;
    init_tracing(&config)?;

    tracing::info!("Configuration: {:?}", config);

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpBatteryRepository::new(&config.api)?);

    // Create store and controller (application layer)
    let store = DashboardStore::new();
    let controller = DashboardController::new(
        repository,
        store.clone(),
        Duration::from_millis(config.monitoring.refresh_interval_ms),
    );

    // Initial load; auto-refresh starts only when configured to
    controller.load_data().await;
    if config.monitoring.enable_real_time_updates {
        controller.set_auto_refresh(true);
    }

    // Log state transitions for operator visibility (debug level only)
    let mut observer = store.subscribe();
    tokio::spawn(async move {
        while observer.changed().await.is_ok() {
            let state = observer.borrow_and_update().clone();
            tracing::debug!(
                "State updated: loading={} error={:?} last_updated={:?}",
                state.is_loading,
                state.error_message,
                state.last_updated
            );
        }
    });

    let state = Arc::new(AppState {
        store,
        controller: controller.clone(),
        max_data_points: config.monitoring.max_data_points,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/chart", get(get_chart))
        .route("/dashboard/timeframe", post(set_timeframe))
        .route("/dashboard/auto-refresh", post(toggle_auto_refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    println!("Starting battery-dashboard service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    controller.shutdown();

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let level = if config.features.enable_debug_logs {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("battery_dashboard={}", level).parse()?),
        )
        .init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
    }
}
