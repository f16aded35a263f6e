// Mapping of service errors onto HTTP responses
use crate::application::plot_service::PlotError;
use crate::infrastructure::http_response::json_error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("expected json body")]
    ExpectedJson,
    #[error("endpoint not found")]
    EndpointNotFound,
    #[error(transparent)]
    Plot(#[from] PlotError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ExpectedJson => StatusCode::BAD_REQUEST,
            ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::Plot(err) => match err {
                PlotError::Validation(_) => StatusCode::BAD_REQUEST,
                PlotError::NotFound(_) => StatusCode::NOT_FOUND,
                PlotError::FileMissing { .. }
                | PlotError::Render(_)
                | PlotError::RenderTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn log(&self) {
        match self {
            ApiError::Plot(PlotError::FileMissing { id, path }) => {
                tracing::warn!("Plot {} is indexed but {} is missing", id, path.display());
            }
            ApiError::Plot(err @ (PlotError::Render(_) | PlotError::RenderTask(_))) => {
                tracing::error!("Plot generation failed: {:?}", err);
            }
            other => tracing::debug!("Rejected request: {}", other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        json_error(self.status(), self.to_string())
    }
}
