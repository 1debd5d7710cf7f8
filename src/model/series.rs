/// Route-completion and penalty signals are recorded at a fixed 20 Hz.
pub const SAMPLE_RATE_HZ: u32 = 20;
pub const SAMPLE_PERIOD_S: f64 = 0.05;

/// Every 10th sample is charted (20 Hz -> 2 Hz).
pub const PLOT_DECIMATION: usize = 10;
pub const PLOT_PERIOD_S: f64 = SAMPLE_PERIOD_S * PLOT_DECIMATION as f64;

/// Per-sample signals of one run, all of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSeries {
    pub route_completion: Vec<f64>,
    pub penalty: Vec<f64>,
    pub driving_score: Vec<f64>,
    /// Number of infraction events popped from the queue before the series ended.
    pub applied_events: usize,
}

impl ScoreSeries {
    pub fn len(&self) -> usize {
        self.driving_score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.driving_score.is_empty()
    }

    pub fn duration_s(&self) -> f64 {
        self.len().saturating_sub(1) as f64 * SAMPLE_PERIOD_S
    }

    pub fn final_route_completion(&self) -> f64 {
        self.route_completion.last().copied().unwrap_or(0.0)
    }

    pub fn final_penalty(&self) -> f64 {
        self.penalty.last().copied().unwrap_or(1.0)
    }

    pub fn final_driving_score(&self) -> f64 {
        self.driving_score.last().copied().unwrap_or(0.0)
    }
}
