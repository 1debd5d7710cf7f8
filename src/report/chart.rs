use std::error::Error;
use std::fs;
use std::path::Path;

use plotters::prelude::*;

use crate::config::{ChartStyle, Rgb, RunConfig};
use crate::pipeline::annotate::{
    AxisRange, ChartLayout, MarkerKind, format_minutes, tick_positions,
};
use crate::pipeline::downsample::PlotSeries;

pub const X_DESC: &str = "Game time";
pub const Y_DESC: &str = "Score (%)";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Backend-neutral description of the score chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub lines: Vec<SeriesLine>,
    pub layout: ChartLayout,
}

/// Renders a labelled time series with (time, label) markers and persists it.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<(), RenderError>;
}

pub fn build_chart_spec(
    config: &RunConfig,
    plot: &PlotSeries,
    layout: ChartLayout,
    style: &ChartStyle,
) -> ChartSpec {
    let zip = |values: &[f64]| -> Vec<(f64, f64)> {
        plot.time_s
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect()
    };
    ChartSpec {
        title: config.title(),
        x_desc: X_DESC.to_string(),
        y_desc: Y_DESC.to_string(),
        lines: vec![
            SeriesLine {
                label: "route completion".to_string(),
                color: style.route_completion_color,
                points: zip(&plot.route_completion),
            },
            SeriesLine {
                label: "driving score".to_string(),
                color: style.driving_score_color,
                points: zip(&plot.driving_score),
            },
        ],
        layout,
    }
}

/// PNG output through the plotters bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    pub style: ChartStyle,
}

impl PlottersRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        draw_png(chart, &self.style, path).map_err(|e| RenderError::Backend(e.to_string()))?;
        tracing::debug!(path = %path.display(), "chart rendered");
        Ok(())
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Dashed vertical line split into short segments over `y`.
pub fn dash_segments(x: f64, y: AxisRange, dashes: usize) -> Vec<Vec<(f64, f64)>> {
    if dashes == 0 || y.span() <= 0.0 {
        return Vec::new();
    }
    let step = y.span() / (2 * dashes) as f64;
    (0..dashes)
        .map(|k| {
            let start = y.min + 2.0 * k as f64 * step;
            vec![(x, start), (x, start + step)]
        })
        .collect()
}

/// Short upward strokes from the x axis at every multiple of `step`.
pub fn minor_tick_segments(layout: &ChartLayout, step: f64) -> Vec<Vec<(f64, f64)>> {
    let height = layout.y.span() * 0.01;
    tick_positions(layout.x, step)
        .into_iter()
        .map(|t| vec![(t, layout.y.min), (t, layout.y.min + height)])
        .collect()
}

fn draw_png(chart: &ChartSpec, style: &ChartStyle, path: &Path) -> Result<(), Box<dyn Error>> {
    let layout = &chart.layout;
    let font = style.font_family.as_str();
    let label_font = (font, style.label_font_size).into_font();

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let major_ticks = tick_positions(layout.x, style.major_tick_s).len().max(1);

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (font, style.caption_font_size))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(layout.x.min..layout.x.max, layout.y.min..layout.y.max)?;

    ctx.configure_mesh()
        .disable_mesh()
        .x_labels(major_ticks)
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .x_label_formatter(&|v| format_minutes(*v))
        .label_style(label_font.clone())
        .draw()?;

    ctx.draw_series(
        minor_tick_segments(layout, style.minor_tick_s)
            .into_iter()
            .map(|seg| PathElement::new(seg, BLACK)),
    )?;

    for line in &chart.lines {
        let color = rgb(line.color);
        ctx.draw_series(LineSeries::new(
            line.points.iter().copied(),
            color.stroke_width(2),
        ))?
        .label(line.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    for marker in &layout.markers {
        let color = match marker.kind {
            MarkerKind::Infraction => rgb(style.infraction_color),
            MarkerKind::ScenarioTrigger => rgb(style.trigger_color),
        }
        .mix(style.marker_alpha);
        ctx.draw_series(
            dash_segments(marker.time, layout.y, 40)
                .into_iter()
                .map(|seg| PathElement::new(seg, color)),
        )?;
        ctx.draw_series(std::iter::once(Text::new(
            marker.label.clone(),
            marker.label_at,
            label_font.clone().color(&BLACK),
        )))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.0))
        .border_style(WHITE.mix(0.0))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/chart.rs"]
mod tests;
