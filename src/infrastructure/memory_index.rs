// In-memory plot index
use crate::application::plot_index::PlotIndex;
use crate::domain::plot::PlotRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryPlotIndex {
    plots: RwLock<HashMap<String, PlotRecord>>,
}

impl InMemoryPlotIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlotIndex for InMemoryPlotIndex {
    async fn insert(&self, record: PlotRecord) {
        self.plots.write().await.insert(record.id.clone(), record);
    }

    async fn get(&self, id: &str) -> Option<PlotRecord> {
        self.plots.read().await.get(id).cloned()
    }

    async fn count(&self) -> usize {
        self.plots.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn record(id: &str) -> PlotRecord {
        PlotRecord::new(id.to_string(), PathBuf::from(format!("plots/{}.png", id)), Utc::now())
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let index = InMemoryPlotIndex::new();
        assert_eq!(index.count().await, 0);
        assert!(index.get("a").await.is_none());

        index.insert(record("a")).await;

        assert_eq!(index.count().await, 1);
        assert_eq!(index.get("a").await.unwrap().path, PathBuf::from("plots/a.png"));
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let index = Arc::new(InMemoryPlotIndex::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let index = index.clone();
                tokio::spawn(async move { index.insert(record(&format!("plot-{}", i))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(index.count().await, 64);
    }
}
