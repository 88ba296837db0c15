//! PTZ gateway server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;

use gateway_http::{AppConfig, SessionAuthLayer, SessionStore, create_router, state::AppState};
use reolink_cloud::{CloudSession, PtzCloudClient, ReolinkCloudClient};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway_http=debug,reolink_cloud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("PTZ gateway v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    config
        .reolink
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid Reolink configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        vendor = %config.reolink.base_url,
        "Configuration loaded"
    );

    // Vendor client and session cache
    let client = ReolinkCloudClient::new(config.reolink.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize Reolink client: {e}"))?;
    let cloud = Arc::new(CloudSession::new(
        Arc::new(client) as Arc<dyn PtzCloudClient>
    ));

    // Frontend session store
    let sessions = Arc::new(SessionStore::new(config.auth.session_ttl_hours));

    let state = AppState {
        cloud,
        sessions: Arc::clone(&sessions),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production mode: restrict to configured origins
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };

    // Last layer added is outermost: CORS must wrap auth so even 401
    // rejections carry the CORS headers a browser needs to read them
    let app = app
        .layer(SessionAuthLayer::new(sessions))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        () = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
