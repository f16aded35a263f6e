// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::plot_service::PlotService;
use crate::infrastructure::config::load_service_config;
use crate::infrastructure::memory_index::InMemoryPlotIndex;
use crate::infrastructure::plotters_renderer::PlottersRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_service_config()?;
    let addr = config.bind_addr()?;

    // Create services (application layer)
    let plot_service = PlotService::new(
        Arc::new(InMemoryPlotIndex::new()),
        Arc::new(PlottersRenderer::default()),
        config.dir,
    );
    plot_service.ensure_plots_dir().await?;

    // Create application state
    let state = Arc::new(AppState { plot_service });

    // Build router (presentation layer)
    let router = build_router(state.clone());

    // Start server
    tracing::info!(
        "Starting data-plot-visualizer on {}, storing plots in {}",
        addr,
        state.plot_service.plots_dir().display()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
