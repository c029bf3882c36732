use anyhow::{Context, Result};
use reqwest::Client;
use sheetproxy::{
    config::ProxyConfig,
    server,
    sheets::{GoogleCredentials, SheetFetcher},
};
use std::{env, sync::Arc};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    info!("Starting Google Sheets proxy service");

    let config = ProxyConfig::from_env().context("loading configuration from environment")?;
    info!(
        spreadsheet_id = %config.spreadsheet_id,
        range = %config.range,
        api_base = %config.api_base,
        "serving sheet range"
    );

    // Credentials are discovered on first use; failures show up as 500s.
    let credentials = Arc::new(GoogleCredentials::new());
    let fetcher = SheetFetcher::new(Client::new(), credentials, config.clone());

    let routes = server::routes(Arc::new(fetcher));

    let (addr, serving) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(([0, 0, 0, 0], config.port), async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .with_context(|| format!("binding port {}", config.port))?;

    info!("Server listening on http://{}", addr);
    serving.await;

    info!("Server stopped");
    Ok(())
}
