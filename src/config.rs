use std::path::{Path, PathBuf};

use crate::pipeline::penalty::{DEFAULT_TOLERANCE, PenaltyParams};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing {0} (pass the flag or set the environment variable)")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Identifies one evaluated repetition of a route and where its artifacts go.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub save_root: PathBuf,
    pub route_name: String,
    pub repetition: u32,
    pub tolerance: f64,
    pub write_tables: bool,
}

impl RunConfig {
    pub fn new(
        save_root: Option<PathBuf>,
        route_name: Option<String>,
        repetition: u32,
    ) -> Result<Self, ConfigError> {
        let save_root = save_root.ok_or(ConfigError::Missing("save root (SAVE_ROOT)"))?;
        let route_name = route_name
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("route name (ROUTE_NAME)"))?;
        Ok(Self {
            save_root,
            route_name,
            repetition,
            tolerance: DEFAULT_TOLERANCE,
            write_tables: true,
        })
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a finite non-negative number, got {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn penalty_params(&self) -> PenaltyParams {
        PenaltyParams {
            tolerance: self.tolerance,
        }
    }

    pub fn plot_dir(&self) -> PathBuf {
        self.save_root.join("plots").join(&self.route_name)
    }

    pub fn artifact_stem(&self) -> String {
        format!("repetition_{:02}", self.repetition)
    }

    pub fn png_path(&self) -> PathBuf {
        self.plot_dir().join(format!("{}.png", self.artifact_stem()))
    }

    pub fn tsv_path(&self) -> PathBuf {
        self.plot_dir().join(format!("{}.tsv", self.artifact_stem()))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.plot_dir()
            .join(format!("{}.summary.json", self.artifact_stem()))
    }

    /// `<save root leaf>/<route>: repetition NN`, underscores shown as spaces.
    pub fn title(&self) -> String {
        let split = last_segment(&self.save_root);
        format!(
            "{}/{}: repetition {:02}",
            split, self.route_name, self.repetition
        )
        .replace('_', " ")
    }
}

fn last_segment(path: &Path) -> String {
    let raw = path.to_string_lossy();
    raw.rsplit('/').next().unwrap_or_default().to_string()
}

pub type Rgb = (u8, u8, u8);

/// Colours and layout constants for the score chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub route_completion_color: Rgb,
    pub driving_score_color: Rgb,
    pub infraction_color: Rgb,
    pub trigger_color: Rgb,
    pub marker_alpha: f64,
    pub font_family: String,
    pub label_font_size: f64,
    pub caption_font_size: f64,
    /// Label rows cycle after this many markers.
    pub label_repeat: usize,
    /// Vertical label step is `ymax / label_rows`.
    pub label_rows: f64,
    pub label_x_offset_s: f64,
    pub major_tick_s: f64,
    pub minor_tick_s: f64,
    pub axis_margin: f64,
}

impl ChartStyle {
    pub fn default_v1() -> Self {
        Self {
            width: 1200,
            height: 800,
            // seaborn "Paired" entries 0 and 2
            route_completion_color: (166, 206, 227),
            driving_score_color: (178, 223, 138),
            infraction_color: (255, 0, 0),
            trigger_color: (128, 0, 128),
            marker_alpha: 0.5,
            font_family: "sans-serif".to_string(),
            label_font_size: 14.0,
            caption_font_size: 20.0,
            label_repeat: 8,
            label_rows: 30.0,
            label_x_offset_s: 0.2,
            major_tick_s: 60.0,
            minor_tick_s: 15.0,
            axis_margin: 0.05,
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
