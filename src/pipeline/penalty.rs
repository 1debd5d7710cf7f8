use std::collections::VecDeque;

use crate::model::infraction::{InfractionEvent, InfractionKind};
use crate::model::series::{SAMPLE_PERIOD_S, ScoreSeries};

pub const DEFAULT_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyParams {
    /// Match window between a sample boundary and an event timestamp.
    pub tolerance: f64,
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Stable sort by timestamp; events sharing a timestamp keep input order.
pub fn sort_infractions(infractions: &[InfractionEvent]) -> Vec<InfractionEvent> {
    let mut sorted = infractions.to_vec();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
    sorted
}

/// Cumulative penalty factor per sample.
///
/// Only kinds with a penalty are queued. At most one queued event is consumed
/// per sample index, so a burst of events inside one sample period compounds
/// over consecutive indices. Returns the factors and the number of events
/// applied.
pub fn penalty_factors(
    n: usize,
    infractions: &[InfractionEvent],
    params: &PenaltyParams,
) -> (Vec<f64>, usize) {
    if n == 0 {
        return (Vec::new(), 0);
    }
    let mut pending: VecDeque<(f64, f64)> = sort_infractions(infractions)
        .into_iter()
        .filter_map(|ev| ev.kind.penalty().map(|p| (ev.time, p)))
        .collect();
    let mut factors = vec![1.0f64; n];
    let mut applied = 0usize;

    for i in 1..n {
        factors[i] = factors[i - 1];
        let Some(&(time, penalty)) = pending.front() else {
            continue;
        };
        let boundary = i as f64 * SAMPLE_PERIOD_S;
        let delta = boundary - time;
        if delta.abs() < params.tolerance || delta >= SAMPLE_PERIOD_S {
            factors[i] = factors[i - 1] * penalty;
            pending.pop_front();
            applied += 1;
        }
    }

    (factors, applied)
}

/// Route completion times cumulative penalty, sample by sample.
pub fn compute(
    completion: &[f64],
    infractions: &[InfractionEvent],
    params: &PenaltyParams,
) -> ScoreSeries {
    let (penalty, applied_events) = penalty_factors(completion.len(), infractions, params);
    let driving_score = completion
        .iter()
        .zip(penalty.iter())
        .map(|(c, p)| c * p)
        .collect();
    ScoreSeries {
        route_completion: completion.to_vec(),
        penalty,
        driving_score,
        applied_events,
    }
}

pub fn count_penalized(infractions: &[InfractionEvent]) -> usize {
    infractions
        .iter()
        .filter(|ev| ev.kind.penalty().is_some())
        .count()
}

pub fn count_unrecognized(infractions: &[InfractionEvent]) -> usize {
    infractions
        .iter()
        .filter(|ev| matches!(ev.kind, InfractionKind::Unrecognized(_)))
        .count()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/penalty.rs"]
mod tests;
