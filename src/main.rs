//! SearXNG-MCP entry point

use anyhow::Result;
use searxng_mcp::{
    config::load_settings,
    network::SearchClient,
    search::{Aggregator, Planner},
    server::{self, SearchService},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let (settings, config_path) = load_settings()?;

    // stdout is the MCP protocol channel; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting SearXNG-MCP v{}", searxng_mcp::VERSION);
    match config_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!("SearXNG instance: {}", settings.searxng.url);

    // Wire the pipeline: client -> aggregator -> tool facade
    let client = SearchClient::new(&settings.searxng)?;
    let aggregator = Arc::new(Aggregator::new(
        Arc::new(client),
        settings.search.max_results,
    ));
    let planner = Planner::new(settings.planner.clone());
    let service = SearchService::new(aggregator, planner, settings.search.clone());

    info!("Serving MCP tools over stdio");
    server::serve_stdio(service).await
}
