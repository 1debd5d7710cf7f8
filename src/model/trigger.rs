use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named sub-scenario that started during the run. Annotation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTrigger {
    pub time: f64,
    pub route_var_name: String,
}

impl ScenarioTrigger {
    /// Scenario class name for the marker label, falling back to the raw
    /// route variable when the lookup has no entry.
    pub fn display_name<'a>(&'a self, lookup: &'a BTreeMap<String, String>) -> &'a str {
        lookup
            .get(&self.route_var_name)
            .map(String::as_str)
            .unwrap_or(&self.route_var_name)
    }
}
