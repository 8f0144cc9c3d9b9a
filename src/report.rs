use std::collections::BTreeMap;

use fuzzy_logic::{InferenceConfig, Simulation};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RuleReport {
    pub rule: String,
    pub strength: f64,
}

/// Outcome of one simulation run, printed as JSON by the binaries.
#[derive(Debug, Serialize)]
pub struct Report {
    pub inputs: BTreeMap<String, f64>,
    pub outputs: BTreeMap<String, f64>,
    pub rules: Vec<RuleReport>,
    pub warnings: Vec<String>,
    pub config: InferenceConfig,
}

impl Report {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let system = sim.system();

        let inputs = system
            .inputs()
            .filter_map(|var| sim.input(var.name()).map(|x| (var.name().to_string(), x)))
            .collect();

        let rules = system
            .rules()
            .iter()
            .zip(sim.rule_strengths())
            .map(|(rule, strength)| RuleReport {
                rule: rule.name(),
                strength: *strength,
            })
            .collect();

        Report {
            inputs,
            outputs: sim.outputs(),
            rules,
            warnings: sim.warnings().iter().map(|w| w.to_string()).collect(),
            config: *sim.config(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::scenarios::fan_controller;

    #[test]
    fn test_fan_report() {
        let system = fan_controller(InferenceConfig::default()).unwrap();
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("temperature", 60.0), ("humidity", 40.0)]).unwrap();
        sim.compute().unwrap();

        let report = Report::from_simulation(&sim);
        assert_eq!(report.rules.len(), 9);
        assert_eq!(report.warnings.len(), 1);

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["inputs"]["temperature"], 60.0);
        assert!(json["outputs"]["fan_speed"].as_f64().unwrap() > 50.0);
        assert_eq!(
            json["rules"][6]["rule"],
            "If Temperature is Hot and Humidity is Normal Then Fan Speed is Fast"
        );
        assert_eq!(json["config"]["defuzzify_method"], "centroid");
        assert_eq!(json["config"]["and_method"], "min");
    }
}
