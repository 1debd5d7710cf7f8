use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::RunConfig;
use crate::input::RunRecord;
use crate::model::infraction::penalized_kinds;
use crate::model::series::{SAMPLE_RATE_HZ, ScoreSeries};
use crate::pipeline::penalty::{count_penalized, count_unrecognized};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfractionSummary {
    pub total: usize,
    pub applied: usize,
    /// Penalized kinds timestamped after the last sample, so never applied.
    pub unapplied: usize,
    pub unrecognized: usize,
    pub collisions: usize,
    pub by_kind: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerSummary {
    pub time: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub tool: ToolMeta,
    pub route: String,
    pub repetition: u32,
    pub title: String,
    pub samples: usize,
    pub sample_rate_hz: u32,
    pub duration_s: f64,
    pub tolerance: f64,
    pub final_route_completion: f64,
    pub final_penalty: f64,
    pub final_driving_score: f64,
    pub infractions: InfractionSummary,
    pub scenario_triggers: Vec<TriggerSummary>,
}

pub fn build_summary(config: &RunConfig, record: &RunRecord, series: &ScoreSeries) -> RunSummary {
    let mut by_kind: BTreeMap<String, usize> = penalized_kinds()
        .iter()
        .map(|k| (k.name().to_string(), 0))
        .collect();
    for ev in &record.infractions {
        *by_kind.entry(ev.kind.name().to_string()).or_default() += 1;
    }

    let total = record.infractions.len();
    let infractions = InfractionSummary {
        total,
        applied: series.applied_events,
        unapplied: count_penalized(&record.infractions)
            .saturating_sub(series.applied_events),
        unrecognized: count_unrecognized(&record.infractions),
        collisions: record
            .infractions
            .iter()
            .filter(|ev| ev.kind.is_collision())
            .count(),
        by_kind,
    };

    let scenario_triggers = record
        .scenario_triggers
        .iter()
        .map(|t| TriggerSummary {
            time: t.time,
            name: t.display_name(&record.scenario_lookup).to_string(),
        })
        .collect();

    RunSummary {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        route: config.route_name.clone(),
        repetition: config.repetition,
        title: config.title(),
        samples: series.len(),
        sample_rate_hz: SAMPLE_RATE_HZ,
        duration_s: series.duration_s(),
        tolerance: config.tolerance,
        final_route_completion: series.final_route_completion(),
        final_penalty: series.final_penalty(),
        final_driving_score: series.final_driving_score(),
        infractions,
        scenario_triggers,
    }
}

pub fn render_summary_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
