use std::fs;
use std::path::PathBuf;

use crate::config::{ChartStyle, RunConfig};
use crate::input::RunRecord;
use crate::model::series::ScoreSeries;
use crate::pipeline::annotate::layout_chart;
use crate::pipeline::downsample::downsample;
use crate::pipeline::penalty::sort_infractions;

pub mod chart;
pub mod summary;
pub mod table;

use chart::{ChartRenderer, RenderError, build_chart_spec};
use summary::{build_summary, render_summary_json};
use table::write_series_tsv;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub chart: PathBuf,
    pub table: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

pub struct ReportInput<'a> {
    pub config: &'a RunConfig,
    pub record: &'a RunRecord,
    pub series: &'a ScoreSeries,
    pub style: &'a ChartStyle,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Downsamples, lays out and renders the chart, then writes the optional
/// TSV and summary next to it.
pub fn write_reports(
    input: &ReportInput<'_>,
    renderer: &dyn ChartRenderer,
) -> Result<ReportPaths, ReportError> {
    let config = input.config;
    fs::create_dir_all(config.plot_dir())?;

    let plot = downsample(input.series);
    let sorted = sort_infractions(&input.record.infractions);
    let layout = layout_chart(
        &plot,
        &sorted,
        &input.record.scenario_triggers,
        &input.record.scenario_lookup,
        input.style,
    );
    let dropped = sorted.len() + input.record.scenario_triggers.len() - layout.markers.len();
    if dropped > 0 {
        tracing::warn!(dropped, "markers fall outside the charted time range");
    }

    let chart_path = config.png_path();
    let spec = build_chart_spec(config, &plot, layout, input.style);
    renderer.render(&spec, &chart_path)?;
    tracing::info!(path = %chart_path.display(), "chart written");

    let mut paths = ReportPaths {
        chart: chart_path,
        table: None,
        summary: None,
    };
    if !config.write_tables {
        return Ok(paths);
    }

    let table_path = config.tsv_path();
    write_series_tsv(&plot, &table_path)?;

    let summary_path = config.summary_path();
    let summary = build_summary(config, input.record, input.series);
    fs::write(&summary_path, render_summary_json(&summary)?)?;
    tracing::info!(
        table = %table_path.display(),
        summary = %summary_path.display(),
        final_driving_score = summary.final_driving_score,
        "tables written"
    );

    paths.table = Some(table_path);
    paths.summary = Some(summary_path);
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
