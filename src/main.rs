// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::fleet_repository::FleetRepository;
use crate::application::replay_service::ReplayService;
use crate::application::simulation_service::SimulationService;
use crate::domain::fleet::Fleet;
use crate::infrastructure::builtin_repository::BuiltinRepository;
use crate::infrastructure::config::{load_simulator_config, FleetSource};
use crate::infrastructure::file_repository::FileRepository;
use crate::infrastructure::http_repository::HttpRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard, fleet_summary, health_check, replay, snapshots};

fn build_repository(source: &FleetSource) -> anyhow::Result<Arc<dyn FleetRepository>> {
    let repository: Arc<dyn FleetRepository> = match source {
        FleetSource::Builtin => Arc::new(BuiltinRepository),
        FleetSource::File { path } => Arc::new(FileRepository::new(path.clone())),
        FleetSource::Http { url } => Arc::new(HttpRepository::new(url.clone())?),
    };
    Ok(repository)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_simulator_config().context("Failed to load simulator configuration")?;

    // Load the fleet once; ingestion errors end the session before serving
    let repository = build_repository(&config.source)?;
    tracing::info!("Loading fleet from {}", repository.describe());
    let records = repository.load_records().await?;
    let fleet = match Fleet::new(records) {
        Ok(fleet) => Arc::new(fleet),
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    tracing::info!(
        "Loaded {} records for {} vehicles ({} → {})",
        fleet.record_count(),
        fleet.vehicle_ids().len(),
        fleet.min_timestamp(),
        fleet.max_timestamp()
    );

    // Create services (application layer)
    let simulation_service = SimulationService::new(fleet, config.clone());
    let replay_service = ReplayService::new(simulation_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        simulation_service,
        replay_service,
    });

    // Build router (presentation layer)
    // Compression is handled in the response builders, not by a layer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/fleet", get(fleet_summary))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/snapshots", get(snapshots))
        .route("/dashboard/replay", get(replay))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;
    tracing::info!("Starting fleet-simulator service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
