// Chart renderer trait - Boundary to the rasterization library
use crate::domain::plot::PlotRequest;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("output file was not written: {0}")]
    Output(#[from] std::io::Error),
}

/// Renders a line chart of the request's points and writes it as a PNG to
/// `path`. Implementations are blocking.
pub trait ChartRenderer: Send + Sync {
    fn render_line_chart(&self, request: &PlotRequest, path: &Path) -> Result<(), RenderError>;
}
