use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmatch::config;
use bookmatch::infrastructure::AppState;
use bookmatch::server::{build_router, find_available_port};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    if config.gemini.api_key.is_none() {
        tracing::warn!(
            "GEMINI_API_KEY is not set; recommendation requests will be rejected upstream"
        );
    }
    tracing::debug!("Configuration: {:?}", config);

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to load option lists: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state, &config.cors_allowed_origins);

    let Some(port) = find_available_port(config.port) else {
        tracing::error!("No available port near {}", config.port);
        std::process::exit(1);
    };

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("BookMatch listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
