// Line chart rendering with plotters
use crate::application::chart_renderer::{ChartRenderer, RenderError};
use crate::domain::plot::PlotRequest;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// 6x4 inch figure at 120 dpi
const DEFAULT_SIZE: (u32, u32) = (720, 480);
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_line_chart(&self, request: &PlotRequest, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let metadata = &request.metadata;
        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(65);
        if !metadata.title.trim().is_empty() {
            builder.caption(&metadata.title, (FONT_FAMILY, 20).into_font());
        }

        let x_axis = Axis::fit(&request.x_values);
        let y_axis = Axis::fit(&request.y_values);

        let mut chart = builder
            .build_cartesian_2d(x_axis.range.clone(), y_axis.range.clone())
            .map_err(drawing)?;

        let x_format = |v: &f64| x_axis.label(*v);
        let y_format = |v: &f64| y_axis.label(*v);

        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(metadata.x_label.as_str())
                .y_desc(metadata.y_label.as_str())
                .axis_desc_style((FONT_FAMILY, 15))
                .bold_line_style(BLACK.mix(0.12))
                .light_line_style(BLACK.mix(0.04));
            if x_axis.is_scaled() {
                mesh.x_label_formatter(&x_format);
            }
            if y_axis.is_scaled() {
                mesh.y_label_formatter(&y_format);
            }
            mesh.draw().map_err(drawing)?;
        }

        for segment in finite_segments(request) {
            let points = segment
                .into_iter()
                .map(|(x, y)| (x_axis.project(x), y_axis.project(y)));
            chart
                .draw_series(LineSeries::new(points, LINE_COLOR.stroke_width(2)))
                .map_err(drawing)?;
        }

        root.present().map_err(drawing)?;

        // the encoder must have left a file behind
        std::fs::metadata(path)?;
        Ok(())
    }
}

fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Runs of consecutive points where both coordinates are finite. A NaN or
/// infinity breaks the line instead of failing the render.
fn finite_segments(request: &PlotRequest) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (x, y) in request.points() {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Largest magnitude plotted unscaled. Keeps both ends of the padded axis
/// and its width finite, which the tick search needs to terminate.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;
const OVERSIZE_SCALE: f64 = 4.0;

/// One chart axis: the plotted range and the factor data is divided by to
/// fit in it.
#[derive(Debug, Clone, PartialEq)]
struct Axis {
    range: Range<f64>,
    scale: f64,
}

impl Axis {
    /// Data extent padded by 5% per side. Constant data is widened so the axis
    /// never collapses; data with no finite value gets `0..1`.
    fn fit(values: &[f64]) -> Self {
        let (min, max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return Self {
                range: 0.0..1.0,
                scale: 1.0,
            };
        }

        let scale = if min.abs().max(max.abs()) > AXIS_LIMIT {
            OVERSIZE_SCALE
        } else {
            1.0
        };
        let (min, max) = (min / scale, max / scale);

        let span = max - min;
        let pad = if span == 0.0 {
            (min.abs() * 0.05).max(1.0)
        } else {
            span * 0.05
        };

        Self {
            range: (min - pad)..(max + pad),
            scale,
        }
    }

    fn is_scaled(&self) -> bool {
        self.scale != 1.0
    }

    fn project(&self, value: f64) -> f64 {
        value / self.scale
    }

    fn label(&self, value: f64) -> String {
        format!("{:.2e}", value * self.scale)
    }
}
