use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::infraction::{InfractionEvent, InfractionKind};
use crate::model::trigger::ScenarioTrigger;
use crate::pipeline::annotate::MarkerKind;
use crate::pipeline::penalty::{PenaltyParams, compute};
use super::chart::ChartSpec;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("driving_score_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[derive(Default)]
struct RecordingRenderer {
    charts: RefCell<Vec<(ChartSpec, PathBuf)>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<(), RenderError> {
        std::fs::write(path, b"png")?;
        self.charts
            .borrow_mut()
            .push((chart.clone(), path.to_path_buf()));
        Ok(())
    }
}

fn record() -> RunRecord {
    let mut lookup = std::collections::BTreeMap::new();
    lookup.insert("S3_cross".to_string(), "DynamicObjectCrossing".to_string());
    RunRecord {
        route_completion: (0..41).map(|i| i as f64 / 40.0).collect(),
        infractions: vec![
            InfractionEvent::new(1.0, InfractionKind::StopInfraction),
            InfractionEvent::new(0.5, InfractionKind::CollisionVehicle),
            InfractionEvent::new(90.0, InfractionKind::CollisionPedestrian),
            InfractionEvent::new(
                0.5,
                InfractionKind::Unrecognized("ROUTE_DEVIATION".to_string()),
            ),
        ],
        scenario_triggers: vec![ScenarioTrigger {
            time: 0.25,
            route_var_name: "S3_cross".to_string(),
        }],
        scenario_lookup: lookup,
    }
}

fn config(root: &Path) -> RunConfig {
    RunConfig::new(
        Some(root.join("eval_run")),
        Some("route_01".to_string()),
        2,
    )
    .unwrap()
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.48), "0.480000");
    assert_eq!(format_f64_6(1.0), "1.000000");
}

#[test]
fn test_write_reports_all_artifacts() {
    let dir = make_temp_dir();
    let cfg = config(&dir);
    let rec = record();
    let series = compute(&rec.route_completion, &rec.infractions, &PenaltyParams::default());
    let style = ChartStyle::default_v1();
    let renderer = RecordingRenderer::default();

    let paths = write_reports(
        &ReportInput {
            config: &cfg,
            record: &rec,
            series: &series,
            style: &style,
        },
        &renderer,
    )
    .unwrap();

    assert_eq!(
        paths.chart,
        dir.join("eval_run/plots/route_01/repetition_02.png")
    );
    assert!(paths.chart.exists());

    let charts = renderer.charts.borrow();
    assert_eq!(charts.len(), 1);
    let spec = &charts[0].0;
    assert_eq!(spec.title, "eval run/route 01: repetition 02");
    assert_eq!(spec.lines.len(), 2);
    assert_eq!(spec.lines[0].points.len(), 5);
    // 90 s collision lies past the 2 s chart and is not drawn; the
    // unrecognized event is still marked
    let infraction_markers = spec
        .layout
        .markers
        .iter()
        .filter(|m| m.kind == MarkerKind::Infraction)
        .count();
    assert_eq!(infraction_markers, 3);
    assert_eq!(spec.layout.markers[0].label, "hit vehicle (0.6x)");

    let table = std::fs::read_to_string(paths.table.unwrap()).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "time_s\troute_completion\tpenalty\tdriving_score");
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("0.000000\t0.000000\t1.000000"));

    let summary = std::fs::read_to_string(paths.summary.unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(json["route"], "route_01");
    assert_eq!(json["repetition"], 2);
    assert_eq!(json["samples"], 41);
    assert_eq!(json["infractions"]["total"], 4);
    assert_eq!(json["infractions"]["applied"], 2);
    assert_eq!(json["infractions"]["unapplied"], 1);
    assert_eq!(json["infractions"]["collisions"], 2);
    assert_eq!(json["infractions"]["unrecognized"], 1);
    assert_eq!(json["infractions"]["by_kind"]["STOP_INFRACTION"], 1);
    assert_eq!(json["infractions"]["by_kind"]["ROUTE_DEVIATION"], 1);
    assert_eq!(json["infractions"]["by_kind"]["COLLISION_STATIC"], 0);
    assert_eq!(
        json["scenario_triggers"][0]["name"],
        "DynamicObjectCrossing"
    );
    let final_score = json["final_driving_score"].as_f64().unwrap();
    assert!((final_score - 0.48).abs() < 1e-12);
}

#[test]
fn test_write_reports_chart_only() {
    let dir = make_temp_dir();
    let mut cfg = config(&dir);
    cfg.write_tables = false;
    let rec = record();
    let series = compute(&rec.route_completion, &rec.infractions, &PenaltyParams::default());
    let style = ChartStyle::default_v1();
    let renderer = RecordingRenderer::default();

    let paths = write_reports(
        &ReportInput {
            config: &cfg,
            record: &rec,
            series: &series,
            style: &style,
        },
        &renderer,
    )
    .unwrap();
    assert!(paths.table.is_none());
    assert!(paths.summary.is_none());
    assert!(!cfg.tsv_path().exists());
}

#[test]
fn test_write_reports_empty_series() {
    let dir = make_temp_dir();
    let cfg = config(&dir);
    let rec = RunRecord::default();
    let series = compute(&[], &[], &PenaltyParams::default());
    let style = ChartStyle::default_v1();
    let renderer = RecordingRenderer::default();

    let paths = write_reports(
        &ReportInput {
            config: &cfg,
            record: &rec,
            series: &series,
            style: &style,
        },
        &renderer,
    )
    .unwrap();
    let table = std::fs::read_to_string(paths.table.unwrap()).unwrap();
    assert_eq!(table.lines().count(), 1);
    let summary = std::fs::read_to_string(paths.summary.unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(json["samples"], 0);
    assert_eq!(json["final_penalty"], 1.0);
}
