use std::error::Error;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_server::pipeline::{Orchestrator, PipelineConfig};
use trip_server::web::{AppState, create_router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("TRIP_SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let mut config = PipelineConfig::default();
    if let Ok(seed) = std::env::var("TRIP_PLANNER_SEED") {
        config = config.with_seed(seed.parse()?);
    }
    if std::env::var_os("TRIP_PLANNER_SEQUENTIAL").is_some() {
        config.concurrent = false;
    }

    let orchestrator = Orchestrator::builtin(config)?;
    info!(stages = ?orchestrator.stage_names(), "Pipeline ready");

    let app = create_router(AppState::new(orchestrator));

    info!("Trip Planner listening on http://{addr}");
    info!("  GET  /api/health  - Health check");
    info!("  GET  /api/agents  - Worker stages");
    info!("  POST /api/plan    - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
