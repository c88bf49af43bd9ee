use careorbit::adapters::api_handler::ApiState;
use careorbit::agents::core::Narrator;
use careorbit::agents::Orchestrator;
use careorbit::cli::Cli;
use careorbit::config::Settings;
use careorbit::persistence::{InMemoryCareStore, SharedCareStore};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    info!("Starting CareOrbit on {}", settings.address());

    let store = if settings.demo_data {
        InMemoryCareStore::with_demo_data()
    } else {
        InMemoryCareStore::new()
    };
    let (patients, medications, appointments, care_gaps) = store.counts().await;
    info!(
        patients,
        medications, appointments, care_gaps, "Care record store ready"
    );
    let store: SharedCareStore = Arc::new(store);

    // Capability check: completion service or demo mode, decided once
    let narrator = Narrator::from_config(settings.completion.as_ref());

    let orchestrator = Arc::new(Orchestrator::new(
        store.clone(),
        narrator,
        &settings.orchestration,
        &settings.router,
    ));
    info!(
        agents = orchestrator.agents().len(),
        demo_mode = !orchestrator.completion_configured(),
        "Orchestrator ready"
    );

    let app = careorbit::create_app(ApiState {
        store,
        orchestrator,
    });

    // Start server
    let addr: SocketAddr = settings.address().parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
