// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{create_plot, download_plot, health_check, not_found};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/plots", post(create_plot))
        .route("/plots/:id", get(download_plot))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
