// Plot index trait - Process-wide lookup of generated plots
use crate::domain::plot::PlotRecord;
use async_trait::async_trait;

/// Additive store of plot records. There is no removal: entries live for the
/// lifetime of the process.
#[async_trait]
pub trait PlotIndex: Send + Sync {
    /// Register a freshly rendered plot
    async fn insert(&self, record: PlotRecord);

    /// Look up a plot by identifier
    async fn get(&self, id: &str) -> Option<PlotRecord>;

    /// Number of plots recorded since start
    async fn count(&self) -> usize;
}
