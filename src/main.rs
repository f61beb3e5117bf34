use hearthstone_table::server::{self, AppState};
use hearthstone_table::{AppConfig, CatalogClient};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Fetching Hearthstone access token and metadata...");
    let client = match CatalogClient::connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Creating Hearthstone client failed: {:#}", e);
            tracing::error!("Please verify:");
            tracing::error!("  - HEARTHSTONE_CLIENT_ID and HEARTHSTONE_CLIENT_SECRET are correct");
            tracing::error!("  - HEARTHSTONE_TOKEN_URL is correct: {}", config.token_url);
            tracing::error!("  - HEARTHSTONE_API_URL is correct: {}", config.api_url);
            std::process::exit(1);
        }
    };
    tracing::info!("Using access token {}", client.token_preview());

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting HTTP server on {}", config.bind_addr);

    let ct = CancellationToken::new();
    let state = AppState::new(client, config.template_path.clone());
    let server = tokio::spawn(server::serve(listener, state, ct.clone()));

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    server.await??;
    Ok(())
}
