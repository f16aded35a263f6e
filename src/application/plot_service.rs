// Plot service - Use cases for generating and retrieving plots
use crate::application::chart_renderer::{ChartRenderer, RenderError};
use crate::application::plot_index::PlotIndex;
use crate::application::request_validator::{ValidationError, validate_plot_request};
use crate::domain::plot::{PlotRecord, PlotRequest};
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("plot '{0}' not found")]
    NotFound(String),
    #[error("plot file is missing or unavailable")]
    FileMissing { id: String, path: PathBuf },
    #[error("failed to generate plot")]
    Render(#[from] RenderError),
    #[error("failed to generate plot")]
    RenderTask(#[from] tokio::task::JoinError),
}

/// A stored plot together with the image bytes read from disk
#[derive(Debug, Clone)]
pub struct PlotImage {
    pub record: PlotRecord,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct PlotService {
    index: Arc<dyn PlotIndex>,
    renderer: Arc<dyn ChartRenderer>,
    plots_dir: PathBuf,
}

impl PlotService {
    pub fn new(
        index: Arc<dyn PlotIndex>,
        renderer: Arc<dyn ChartRenderer>,
        plots_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            index,
            renderer,
            plots_dir: plots_dir.into(),
        }
    }

    pub fn plots_dir(&self) -> &Path {
        &self.plots_dir
    }

    /// Create the plots directory if it does not exist yet
    pub async fn ensure_plots_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.plots_dir).await
    }

    /// Validate a raw payload and render it
    pub async fn create_plot(&self, payload: &Value) -> Result<PlotRecord, PlotError> {
        let request = validate_plot_request(payload)?;
        self.generate(request).await
    }

    /// Render a validated request to `<plots_dir>/<id>.png` and index it.
    /// Nothing is indexed when rendering fails.
    pub async fn generate(&self, request: PlotRequest) -> Result<PlotRecord, PlotError> {
        let id = Uuid::new_v4().to_string();
        let path = self.plots_dir.join(format!("{}.png", id));
        let points = request.point_count();

        let renderer = self.renderer.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || renderer.render_line_chart(&request, &target))
            .await??;

        let record = PlotRecord::new(id, path, Utc::now());
        self.index.insert(record.clone()).await;

        tracing::info!(
            "Generated plot {} with {} points at {}",
            record.id,
            points,
            record.image_path()
        );

        Ok(record)
    }

    /// Look up a plot and read its image. A known id whose file has gone
    /// missing is reported as `FileMissing`, not repaired.
    pub async fn load_plot(&self, id: &str) -> Result<PlotImage, PlotError> {
        let record = self
            .index
            .get(id)
            .await
            .ok_or_else(|| PlotError::NotFound(id.to_string()))?;

        let missing = || PlotError::FileMissing {
            id: record.id.clone(),
            path: record.path.clone(),
        };

        if !tokio::fs::try_exists(&record.path).await.unwrap_or(false) {
            return Err(missing());
        }

        let bytes = tokio::fs::read(&record.path).await.map_err(|e| {
            tracing::warn!("Failed to read plot file {}: {}", record.path.display(), e);
            missing()
        })?;

        Ok(PlotImage { record, bytes })
    }

    pub async fn stored_plots(&self) -> usize {
        self.index.count().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::plot::PlotMetadata;
    use crate::infrastructure::memory_index::InMemoryPlotIndex;
    use serde_json::json;
    use tempfile::TempDir;

    pub(crate) const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    /// Writes a fixed byte string instead of rasterizing
    pub(crate) struct StubRenderer;

    impl ChartRenderer for StubRenderer {
        fn render_line_chart(&self, _request: &PlotRequest, path: &Path) -> Result<(), RenderError> {
            std::fs::write(path, FAKE_PNG)?;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render_line_chart(&self, _request: &PlotRequest, _path: &Path) -> Result<(), RenderError> {
            Err(RenderError::Drawing("no backend".to_string()))
        }
    }

    fn service(dir: &TempDir, renderer: Arc<dyn ChartRenderer>) -> PlotService {
        PlotService::new(Arc::new(InMemoryPlotIndex::new()), renderer, dir.path())
    }

    fn sample_request() -> PlotRequest {
        PlotRequest {
            x_values: vec![0.0, 1.0, 2.0],
            y_values: vec![1.0, 4.0, 9.0],
            metadata: PlotMetadata::default(),
        }
    }

    #[tokio::test]
    async fn test_generate_writes_file_and_indexes() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(StubRenderer));

        let record = service.generate(sample_request()).await.unwrap();

        assert_eq!(record.path, dir.path().join(format!("{}.png", record.id)));
        assert!(record.path.exists());
        assert_eq!(service.stored_plots().await, 1);

        let image = service.load_plot(&record.id).await.unwrap();
        assert_eq!(image.record, record);
        assert_eq!(image.bytes, FAKE_PNG);
    }

    #[tokio::test]
    async fn test_generate_uses_fresh_ids() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(StubRenderer));

        let first = service.generate(sample_request()).await.unwrap();
        let second = service.generate(sample_request()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.stored_plots().await, 2);
    }

    #[tokio::test]
    async fn test_create_plot_rejects_before_rendering() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(StubRenderer));

        let err = service.create_plot(&json!({ "data": [1] })).await.unwrap_err();

        assert!(matches!(err, PlotError::Validation(ValidationError::TooFewPoints)));
        assert_eq!(service.stored_plots().await, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_render_failure_is_not_indexed() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(FailingRenderer));

        let err = service.generate(sample_request()).await.unwrap_err();

        assert!(matches!(err, PlotError::Render(_)));
        assert_eq!(service.stored_plots().await, 0);
    }

    #[tokio::test]
    async fn test_load_unknown_plot() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(StubRenderer));

        let err = service.load_plot("does-not-exist").await.unwrap_err();

        assert!(matches!(err, PlotError::NotFound(ref id) if id == "does-not-exist"));
        assert_eq!(err.to_string(), "plot 'does-not-exist' not found");
    }

    #[tokio::test]
    async fn test_load_plot_with_missing_file() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, Arc::new(StubRenderer));

        let record = service.generate(sample_request()).await.unwrap();
        std::fs::remove_file(&record.path).unwrap();

        let err = service.load_plot(&record.id).await.unwrap_err();
        assert!(matches!(err, PlotError::FileMissing { .. }));
        assert_eq!(service.stored_plots().await, 1);
    }

    #[tokio::test]
    async fn test_ensure_plots_dir_creates_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let service = PlotService::new(
            Arc::new(InMemoryPlotIndex::new()),
            Arc::new(StubRenderer),
            &nested,
        );

        service.ensure_plots_dir().await.unwrap();
        service.ensure_plots_dir().await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(service.plots_dir(), nested.as_path());
    }
}
