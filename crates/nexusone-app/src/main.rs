//! NexusOne service entry point.

use std::error::Error;
use std::sync::Arc;

use nexusone_app::config::AppConfig;
use nexusone_app::state::AppState;
use nexusone_app::telemetry;
use nexusone_core::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init_tracing();

    tracing::info!("Starting NexusOne aggregation service");

    let config = AppConfig::from_env()?;
    let state = AppState::bootstrap(&config, Arc::new(SystemClock))?;
    state.event_bus.seal();

    let sweeper = state.spawn_sweeper();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    sweeper.abort();
    state.shutdown().await;

    Ok(())
}
