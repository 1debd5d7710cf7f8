use crate::model::series::{PLOT_DECIMATION, PLOT_PERIOD_S, ScoreSeries};

/// Series reduced to the chart rate, with its time axis in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSeries {
    pub time_s: Vec<f64>,
    pub route_completion: Vec<f64>,
    pub penalty: Vec<f64>,
    pub driving_score: Vec<f64>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// Keeps samples 0, step, 2*step, ...
pub fn decimate(values: &[f64], step: usize) -> Vec<f64> {
    values.iter().step_by(step.max(1)).copied().collect()
}

pub fn plot_time_axis(len: usize) -> Vec<f64> {
    (0..len).map(|k| k as f64 * PLOT_PERIOD_S).collect()
}

pub fn downsample(series: &ScoreSeries) -> PlotSeries {
    let route_completion = decimate(&series.route_completion, PLOT_DECIMATION);
    let penalty = decimate(&series.penalty, PLOT_DECIMATION);
    let driving_score = decimate(&series.driving_score, PLOT_DECIMATION);
    PlotSeries {
        time_s: plot_time_axis(driving_score.len()),
        route_completion,
        penalty,
        driving_score,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/downsample.rs"]
mod tests;
