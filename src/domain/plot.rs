// Plot domain models
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Data Plot";
pub const DEFAULT_X_LABEL: &str = "Index";
pub const DEFAULT_Y_LABEL: &str = "Value";

#[derive(Debug, Clone, PartialEq)]
pub struct PlotMetadata {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
        }
    }
}

/// A validated series ready to be rendered. `x_values` and `y_values` always
/// have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub metadata: PlotMetadata,
}

impl PlotRequest {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values
            .iter()
            .copied()
            .zip(self.y_values.iter().copied())
    }

    pub fn point_count(&self) -> usize {
        self.y_values.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotRecord {
    pub id: String,
    pub path: PathBuf,
    pub created_at: String,
}

impl PlotRecord {
    pub fn new(id: String, path: PathBuf, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            path,
            created_at: format_timestamp(created_at),
        }
    }

    pub fn image_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn download_name(&self) -> String {
        format!("plot-{}.png", self.id)
    }
}

/// ISO-8601 UTC with microseconds, e.g. `2026-10-19T08:15:02.123456Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
