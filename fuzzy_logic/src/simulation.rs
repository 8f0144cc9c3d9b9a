use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rayon::prelude::*;

use crate::{
    config::InferenceConfig,
    error::{FuzzyError, Result},
    linguistic::LinguisticVarKind,
    set::FuzzySet,
    system::ControlSystem,
};

/// A crisp input that fell outside the universe of its variable.
#[derive(Debug, Clone, PartialEq)]
pub struct OutOfDomain {
    pub var: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for OutOfDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input {} = {} is outside [{}, {}]",
            self.var, self.value, self.min, self.max
        )
    }
}

/// Evaluation context bound to one [`ControlSystem`].
///
/// Holds the crisp inputs, the last computed outputs and the diagnostics of the last
/// [`compute`](Simulation::compute). Never mutates the system.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    system: &'a ControlSystem,
    config: InferenceConfig,
    inputs: Vec<Option<f64>>,
    outputs: Vec<Option<f64>>,
    degrees: Vec<Vec<f64>>,
    strengths: Vec<f64>,
    aggregates: Vec<Option<FuzzySet<'a>>>,
    warnings: Vec<OutOfDomain>,
}

impl<'a> Simulation<'a> {
    pub fn new(system: &'a ControlSystem) -> Self {
        Self::with_config(system, *system.config())
    }

    pub fn with_config(system: &'a ControlSystem, config: InferenceConfig) -> Self {
        let n_vars = system.variables().len();
        let aggregates = system
            .variables()
            .iter()
            .map(|var| match var.kind() {
                LinguisticVarKind::Output => Some(FuzzySet::empty(var.universe())),
                LinguisticVarKind::Input => None,
            })
            .collect();

        Simulation {
            system,
            config,
            inputs: vec![None; n_vars],
            outputs: vec![None; n_vars],
            degrees: vec![Vec::new(); n_vars],
            strengths: vec![0.0; system.rules().len()],
            aggregates,
            warnings: Vec::new(),
        }
    }

    pub fn system(&self) -> &'a ControlSystem {
        self.system
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    fn lookup(&self, name: &str, kind: LinguisticVarKind) -> Result<usize> {
        let i = self
            .system
            .var_index(name)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_string()))?;
        if self.system.variables()[i].kind() != kind {
            return Err(match kind {
                LinguisticVarKind::Input => FuzzyError::NotAnInput(name.to_string()),
                LinguisticVarKind::Output => FuzzyError::NotAnOutput(name.to_string()),
            });
        }
        Ok(i)
    }

    pub fn set_input(&mut self, name: &str, value: f64) -> Result<&mut Self> {
        let i = self.lookup(name, LinguisticVarKind::Input)?;
        self.inputs[i] = Some(value);
        Ok(self)
    }

    pub fn set_inputs<'n>(
        &mut self,
        inputs: impl IntoIterator<Item = (&'n str, f64)>,
    ) -> Result<&mut Self> {
        for (name, value) in inputs {
            self.set_input(name, value)?;
        }
        Ok(self)
    }

    pub fn clear_input(&mut self, name: &str) -> Result<&mut Self> {
        let i = self.lookup(name, LinguisticVarKind::Input)?;
        self.inputs[i] = None;
        Ok(self)
    }

    pub fn input(&self, name: &str) -> Option<f64> {
        self.system.var_index(name).and_then(|i| self.inputs[i])
    }

    /// Run fuzzification, rule firing, implication, aggregation and defuzzification.
    ///
    /// A missing input leaves every previous result untouched. When an output has no
    /// activation, the other outputs are still stored and the first silent one is reported.
    pub fn compute(&mut self) -> Result<()> {
        let system = self.system;

        if let Some(missing) = system.required_inputs.iter().find(|i| self.inputs[**i].is_none()) {
            return Err(FuzzyError::MissingInput(
                system.variables()[*missing].name().to_string(),
            ));
        }

        self.fuzzify();

        for (i, rule) in system.compiled.iter().enumerate() {
            let strength = rule
                .condition
                .eval(&self.degrees, self.config.and_method, self.config.or_method)
                * rule.weight;
            log::debug!("rule {} fired at {}", i, strength);
            self.strengths[i] = strength;
        }

        for aggregate in self.aggregates.iter_mut().flatten() {
            aggregate.clear();
        }
        for (rule, strength) in system.compiled.iter().zip(&self.strengths) {
            if *strength <= 0.0 {
                continue;
            }
            for (var, term) in &rule.consequents {
                if let Some(aggregate) = self.aggregates[*var].as_mut() {
                    aggregate.union_clipped(&system.sampled_terms[*var][*term], *strength);
                }
            }
        }

        let mut silent = None;
        for var in &system.outputs {
            let value = self.aggregates[*var]
                .as_ref()
                .and_then(|aggregate| aggregate.defuzz(self.config.defuzzify_method));
            let name = system.variables()[*var].name();
            match value {
                Some(v) => log::debug!("output {} = {}", name, v),
                None => {
                    log::debug!("output {} has no activation", name);
                    silent.get_or_insert(*var);
                }
            }
            self.outputs[*var] = value;
        }

        match silent {
            Some(var) => Err(FuzzyError::NoActivation(
                system.variables()[var].name().to_string(),
            )),
            None => Ok(()),
        }
    }

    fn fuzzify(&mut self) {
        self.warnings.clear();

        for (i, var) in self.system.variables().iter().enumerate() {
            let Some(value) = self.inputs[i] else {
                self.degrees[i].clear();
                continue;
            };

            let universe = var.universe();
            let mut x = value;
            if !universe.contains(value) {
                let warning = OutOfDomain {
                    var: var.name().to_string(),
                    value,
                    min: universe.min(),
                    max: universe.max(),
                };
                log::warn!("{}", warning);
                self.warnings.push(warning);

                if self.config.clip_to_bounds {
                    x = universe.clamp(value);
                }
            }

            self.degrees[i] = var
                .terms()
                .iter()
                .map(|t| t.membership_f.degree_of(x))
                .collect();
        }
    }

    pub fn output(&self, name: &str) -> Result<f64> {
        let i = self.lookup(name, LinguisticVarKind::Output)?;
        self.outputs[i].ok_or_else(|| FuzzyError::NoOutput(name.to_string()))
    }

    /// Every computed output by name.
    pub fn outputs(&self) -> BTreeMap<String, f64> {
        self.system
            .outputs
            .iter()
            .filter_map(|i| {
                self.outputs[*i].map(|v| (self.system.variables()[*i].name().to_string(), v))
            })
            .collect()
    }

    /// Weighted firing strength of every rule, in rule order.
    pub fn rule_strengths(&self) -> &[f64] {
        &self.strengths
    }

    /// Aggregated fuzzy set of an output, as of the last compute.
    pub fn aggregate(&self, name: &str) -> Option<&FuzzySet<'a>> {
        let i = self.lookup(name, LinguisticVarKind::Output).ok()?;
        self.aggregates[i].as_ref()
    }

    pub fn warnings(&self) -> &[OutOfDomain] {
        &self.warnings
    }

    /// Forget inputs, outputs and diagnostics.
    pub fn reset(&mut self) {
        self.inputs.iter_mut().for_each(|v| *v = None);
        self.outputs.iter_mut().for_each(|v| *v = None);
        self.degrees.iter_mut().for_each(Vec::clear);
        self.strengths.iter_mut().for_each(|s| *s = 0.0);
        for aggregate in self.aggregates.iter_mut().flatten() {
            aggregate.clear();
        }
        self.warnings.clear();
    }
}

/// Evaluate many input sets against one shared system in parallel.
pub fn simulate_batch(
    system: &ControlSystem,
    batch: &[HashMap<String, f64>],
) -> Vec<Result<BTreeMap<String, f64>>> {
    batch
        .par_iter()
        .map(|inputs| {
            let mut sim = Simulation::new(system);
            sim.set_inputs(inputs.iter().map(|(name, value)| (name.as_str(), *value)))?;
            sim.compute()?;
            Ok(sim.outputs())
        })
        .collect()
}
