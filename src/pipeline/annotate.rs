use std::collections::BTreeMap;

use crate::config::ChartStyle;
use crate::model::infraction::InfractionEvent;
use crate::model::trigger::ScenarioTrigger;
use crate::pipeline::downsample::PlotSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Data extent padded by `margin` of the span on each side.
/// Empty or degenerate input widens to +-0.5 around the value.
pub fn autoscale<'a, I>(values: I, margin: f64) -> AxisRange
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return AxisRange {
            min: -0.5,
            max: 0.5,
        };
    }
    let span = hi - lo;
    if span <= f64::EPSILON {
        return AxisRange {
            min: lo - 0.5,
            max: hi + 0.5,
        };
    }
    AxisRange {
        min: lo - span * margin,
        max: hi + span * margin,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Infraction,
    ScenarioTrigger,
}

/// Vertical line at `time` with a text label anchored at `label_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub time: f64,
    pub label: String,
    pub label_at: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub x: AxisRange,
    pub y: AxisRange,
    pub markers: Vec<Marker>,
}

/// Freezes the axes on the plotted series, then places infraction labels
/// stepping down from the top and trigger labels stepping up from the bottom.
/// Markers outside the frozen x range are dropped.
pub fn layout_chart(
    plot: &PlotSeries,
    sorted_infractions: &[InfractionEvent],
    triggers: &[ScenarioTrigger],
    lookup: &BTreeMap<String, String>,
    style: &ChartStyle,
) -> ChartLayout {
    let x = autoscale(&plot.time_s, style.axis_margin);
    let y = autoscale(
        plot.route_completion.iter().chain(plot.driving_score.iter()),
        style.axis_margin,
    );

    let increment = y.max / style.label_rows;
    let repeat = style.label_repeat.max(1);
    let mut markers = Vec::with_capacity(sorted_infractions.len() + triggers.len());

    for (i, ev) in sorted_infractions.iter().enumerate() {
        let offset = increment * ((i % repeat) + 1) as f64;
        markers.push(Marker {
            kind: MarkerKind::Infraction,
            time: ev.time,
            label: ev.kind.marker_label(),
            label_at: (ev.time + style.label_x_offset_s, y.max - offset),
        });
    }

    for (i, trig) in triggers.iter().enumerate() {
        let offset = increment * (i % repeat) as f64;
        markers.push(Marker {
            kind: MarkerKind::ScenarioTrigger,
            time: trig.time,
            label: trig.display_name(lookup).to_string(),
            label_at: (
                trig.time + style.label_x_offset_s,
                y.min + offset + y.max / 60.0,
            ),
        });
    }

    markers.retain(|m| x.contains(m.time));
    ChartLayout { x, y, markers }
}

/// Tick positions at multiples of `step` inside `range`.
pub fn tick_positions(range: AxisRange, step: f64) -> Vec<f64> {
    if step <= 0.0 || !range.min.is_finite() || !range.max.is_finite() {
        return Vec::new();
    }
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Major tick label: whole minutes as `MM:00`.
pub fn format_minutes(seconds: f64) -> String {
    let minute = (seconds / 60.0) as i64;
    format!("{minute:02}:00")
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/annotate.rs"]
mod tests;
