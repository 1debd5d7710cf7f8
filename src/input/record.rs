use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::infraction::InfractionEvent;
use crate::model::trigger::ScenarioTrigger;

/// Everything the scenario runner records for one repetition of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Route completion fraction sampled at 20 Hz.
    pub route_completion: Vec<f64>,
    #[serde(default)]
    pub infractions: Vec<InfractionEvent>,
    #[serde(default)]
    pub scenario_triggers: Vec<ScenarioTrigger>,
    /// Route variable name -> scenario class name.
    #[serde(default)]
    pub scenario_lookup: BTreeMap<String, String>,
}
