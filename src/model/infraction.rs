use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const PENALTY_COLLISION_PEDESTRIAN: f64 = 0.50;
pub const PENALTY_COLLISION_VEHICLE: f64 = 0.60;
pub const PENALTY_COLLISION_STATIC: f64 = 0.65;
pub const PENALTY_TRAFFIC_LIGHT: f64 = 0.70;
pub const PENALTY_STOP: f64 = 0.80;

/// Kind of a timestamped traffic event reported by the scenario runner.
///
/// Only the five listed kinds carry a penalty. Anything else the runner emits
/// is kept as `Unrecognized` so it can still be labelled on the chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InfractionKind {
    CollisionPedestrian,
    CollisionVehicle,
    CollisionStatic,
    TrafficLightInfraction,
    StopInfraction,
    Unrecognized(String),
}

impl InfractionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "COLLISION_PEDESTRIAN" => InfractionKind::CollisionPedestrian,
            "COLLISION_VEHICLE" => InfractionKind::CollisionVehicle,
            "COLLISION_STATIC" => InfractionKind::CollisionStatic,
            "TRAFFIC_LIGHT_INFRACTION" => InfractionKind::TrafficLightInfraction,
            "STOP_INFRACTION" => InfractionKind::StopInfraction,
            other => InfractionKind::Unrecognized(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            InfractionKind::CollisionPedestrian => "COLLISION_PEDESTRIAN",
            InfractionKind::CollisionVehicle => "COLLISION_VEHICLE",
            InfractionKind::CollisionStatic => "COLLISION_STATIC",
            InfractionKind::TrafficLightInfraction => "TRAFFIC_LIGHT_INFRACTION",
            InfractionKind::StopInfraction => "STOP_INFRACTION",
            InfractionKind::Unrecognized(name) => name,
        }
    }

    /// Multiplicative penalty, or `None` for kinds outside the penalty table.
    pub fn penalty(&self) -> Option<f64> {
        match self {
            InfractionKind::CollisionPedestrian => Some(PENALTY_COLLISION_PEDESTRIAN),
            InfractionKind::CollisionVehicle => Some(PENALTY_COLLISION_VEHICLE),
            InfractionKind::CollisionStatic => Some(PENALTY_COLLISION_STATIC),
            InfractionKind::TrafficLightInfraction => Some(PENALTY_TRAFFIC_LIGHT),
            InfractionKind::StopInfraction => Some(PENALTY_STOP),
            InfractionKind::Unrecognized(_) => None,
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            InfractionKind::CollisionPedestrian
                | InfractionKind::CollisionVehicle
                | InfractionKind::CollisionStatic
        )
    }

    /// Chart annotation text, e.g. `ran light (0.7x)`.
    pub fn marker_label(&self) -> String {
        let short = match self {
            InfractionKind::CollisionPedestrian => "hit ped",
            InfractionKind::CollisionVehicle => "hit vehicle",
            InfractionKind::CollisionStatic => "hit static",
            InfractionKind::TrafficLightInfraction => "ran light",
            InfractionKind::StopInfraction => "ran stop",
            InfractionKind::Unrecognized(name) => return name.clone(),
        };
        match self.penalty() {
            Some(p) => format!("{short} ({p}x)"),
            None => short.to_string(),
        }
    }
}

impl fmt::Display for InfractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for InfractionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for InfractionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(InfractionKind::from_name(&name))
    }
}

static PENALIZED_KINDS: [InfractionKind; 5] = [
    InfractionKind::CollisionPedestrian,
    InfractionKind::CollisionVehicle,
    InfractionKind::CollisionStatic,
    InfractionKind::TrafficLightInfraction,
    InfractionKind::StopInfraction,
];

pub fn penalized_kinds() -> &'static [InfractionKind] {
    &PENALIZED_KINDS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfractionEvent {
    /// Game time in seconds.
    pub time: f64,
    pub kind: InfractionKind,
}

impl InfractionEvent {
    pub fn new(time: f64, kind: InfractionKind) -> Self {
        Self { time, kind }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/infraction.rs"]
mod tests;
