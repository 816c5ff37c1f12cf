use crate::handlers;
use axum::{Router as AxumRouter, routing::get};
use finsec_core::config::{ServerConfig, StaticFilesConfig};
use finsec_core::sample::SampleCatalog;
use finsec_store::DataLogWriter;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

/// Shared state for the HTTP API.
pub struct AppState {
    pub data_log: Arc<DataLogWriter>,
    pub samples: SampleCatalog,
}

/// Build the axum router with all service routes.
///
/// Requests and echo sessions share nothing but `state`; the data log writer
/// inside it is the only cross-request resource.
pub fn build_router(state: Arc<AppState>, static_files: &StaticFilesConfig) -> AxumRouter {
    // Demo service: any origin, any method, any header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = AxumRouter::new()
        .route("/health", get(handlers::health::health_check))
        .route("/insert/{data}", get(handlers::insert::insert_data))
        .route("/read/{id}", get(handlers::samples::read_sample))
        .route("/ws/realtime", get(handlers::realtime::realtime_upgrade))
        .with_state(state);

    if static_files.enabled {
        app = app.nest_service(
            static_files.mount_path.as_str(),
            ServeDir::new(&static_files.dir),
        );
    }

    app.layer(cors)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn start_api(config: &ServerConfig, app: AxumRouter) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, "HTTP API listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM (docker stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received, stopping...");
}
