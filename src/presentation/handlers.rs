// HTTP request handlers
use crate::infrastructure::http_response::{STATUS_OK, is_json_request, png_attachment};
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "data-plot-visualizer";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub stored_plots: usize,
}

#[derive(Debug, Serialize)]
pub struct PlotCreatedResponse {
    pub status: &'static str,
    pub plot_id: String,
    pub created_at: String,
    pub image_path: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_OK,
        service: SERVICE_NAME,
        stored_plots: state.plot_service.stored_plots().await,
    })
}

/// Generate a plot from the posted series
pub async fn create_plot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PlotCreatedResponse>, ApiError> {
    if !is_json_request(&headers) {
        return Err(ApiError::ExpectedJson);
    }

    // An unparseable body is validated as "no payload"
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let record = state.plot_service.create_plot(&payload).await?;

    Ok(Json(PlotCreatedResponse {
        status: STATUS_OK,
        image_path: record.image_path(),
        plot_id: record.id,
        created_at: record.created_at,
    }))
}

/// Download a previously generated plot
pub async fn download_plot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let image = state.plot_service.load_plot(&id).await?;

    match png_attachment(image.bytes, &image.record.download_name()) {
        Ok(response) => Ok(response),
        Err(status) => Ok(status.into_response()),
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}
