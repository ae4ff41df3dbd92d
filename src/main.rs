use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use itinerary_planner::config::ServerConfig;
use itinerary_planner::http;
use itinerary_planner::service::ItineraryService;
use itinerary_planner::store::MemoryStore;

/// Save places and generate proximity-ordered travel itineraries.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.server.log_filter)?)
        .init();

    let addr = cli.server.bind_address()?;
    let listener = TcpListener::bind(addr).await?;
    let service = ItineraryService::new(Arc::new(MemoryStore::new()));

    info!(%addr, "listening");
    http::serve(listener, service).await?;
    Ok(())
}
