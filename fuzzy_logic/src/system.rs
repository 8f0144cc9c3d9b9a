use std::collections::HashMap;

use crate::{
    config::InferenceConfig,
    error::{Result, ValidationError},
    linguistic::{LinguisticVar, LinguisticVarKind},
    ops::{AndMethod, OrMethod},
    rule::{Expr, Rule, TermRef},
    set::sample,
};

/// Rule condition with every reference resolved to `(variable, term)` indices.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Term { var: usize, term: usize },
    And(Box<Node>, Box<Node>, Option<AndMethod>),
    Or(Box<Node>, Box<Node>, Option<OrMethod>),
    Not(Box<Node>),
}

impl Node {
    /// Firing strength given the fuzzified degrees of every variable, indexed `[var][term]`.
    ///
    /// `and_op` and `or_op` apply to nodes without a method of their own.
    pub(crate) fn eval(&self, degrees: &[Vec<f64>], and_op: AndMethod, or_op: OrMethod) -> f64 {
        match self {
            Node::Term { var, term } => degrees[*var][*term],
            Node::And(lhs, rhs, method) => method.unwrap_or(and_op).call(
                lhs.eval(degrees, and_op, or_op),
                rhs.eval(degrees, and_op, or_op),
            ),
            Node::Or(lhs, rhs, method) => method.unwrap_or(or_op).call(
                lhs.eval(degrees, and_op, or_op),
                rhs.eval(degrees, and_op, or_op),
            ),
            Node::Not(inner) => 1.0 - inner.eval(degrees, and_op, or_op),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) condition: Node,
    pub(crate) consequents: Vec<(usize, usize)>,
    pub(crate) weight: f64,
}

/// Immutable rule graph over a set of linguistic variables.
///
/// Built once through [`ControlSystemBuilder`], then shared read-only by any number of
/// [`Simulation`](crate::simulation::Simulation)s.
#[derive(Debug, Clone)]
pub struct ControlSystem {
    variables: Vec<LinguisticVar>,
    index: HashMap<String, usize>,
    rules: Vec<Rule>,
    pub(crate) compiled: Vec<CompiledRule>,
    /// Consequent terms sampled on their universe, `[var][term][sample]`; empty for inputs.
    pub(crate) sampled_terms: Vec<Vec<Vec<f64>>>,
    pub(crate) required_inputs: Vec<usize>,
    pub(crate) outputs: Vec<usize>,
    config: InferenceConfig,
}

#[derive(Default)]
pub struct ControlSystemBuilder {
    variables: Vec<LinguisticVar>,
    rules: Vec<Rule>,
    config: InferenceConfig,
}

impl ControlSystemBuilder {
    pub fn variable(mut self, var: LinguisticVar) -> Self {
        self.variables.push(var);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve every rule against the declared variables. Fails on the first offence.
    pub fn build(self) -> Result<ControlSystem> {
        let mut index = HashMap::with_capacity(self.variables.len());
        for (i, var) in self.variables.iter().enumerate() {
            if index.insert(var.name().to_string(), i).is_some() {
                return Err(ValidationError::DuplicateVariable(var.name().to_string()).into());
            }
            if var.terms().is_empty() {
                return Err(ValidationError::EmptyVariable(var.name().to_string()).into());
            }
        }

        let resolver = Resolver {
            variables: &self.variables,
            index: &index,
        };
        let compiled = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| resolver.compile(i, rule))
            .collect::<std::result::Result<Vec<_>, ValidationError>>()?;

        let mut required_inputs = Vec::new();
        let mut targeted = vec![false; self.variables.len()];
        for rule in &compiled {
            collect_inputs(&rule.condition, &mut required_inputs);
            for (var, _) in &rule.consequents {
                targeted[*var] = true;
            }
        }
        required_inputs.sort_unstable();
        required_inputs.dedup();

        let outputs = self
            .variables
            .iter()
            .enumerate()
            .filter(|(_, var)| var.kind() == LinguisticVarKind::Output)
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();
        if let Some(unreachable) = outputs.iter().find(|i| !targeted[**i]) {
            return Err(
                ValidationError::UnreachableOutput(self.variables[*unreachable].name().to_string())
                    .into(),
            );
        }

        let sampled_terms = self
            .variables
            .iter()
            .map(|var| match var.kind() {
                LinguisticVarKind::Input => Vec::new(),
                LinguisticVarKind::Output => var
                    .terms()
                    .iter()
                    .map(|t| sample(var.universe(), &t.membership_f))
                    .collect(),
            })
            .collect();

        log::info!(
            "control system assembled: {} variables, {} rules",
            self.variables.len(),
            self.rules.len()
        );

        Ok(ControlSystem {
            variables: self.variables,
            index,
            rules: self.rules,
            compiled,
            sampled_terms,
            required_inputs,
            outputs,
            config: self.config,
        })
    }
}

fn collect_inputs(node: &Node, out: &mut Vec<usize>) {
    match node {
        Node::Term { var, .. } => out.push(*var),
        Node::And(lhs, rhs, _) | Node::Or(lhs, rhs, _) => {
            collect_inputs(lhs, out);
            collect_inputs(rhs, out);
        }
        Node::Not(inner) => collect_inputs(inner, out),
    }
}

struct Resolver<'a> {
    variables: &'a [LinguisticVar],
    index: &'a HashMap<String, usize>,
}

impl Resolver<'_> {
    fn compile(&self, i: usize, rule: &Rule) -> std::result::Result<CompiledRule, ValidationError> {
        if !(rule.weight > 0.0 && rule.weight <= 1.0) {
            return Err(ValidationError::InvalidWeight {
                rule: i,
                label: rule.name(),
                weight: rule.weight,
            });
        }
        if rule.consequents.is_empty() {
            return Err(ValidationError::NoConsequent {
                rule: i,
                label: rule.name(),
            });
        }

        let condition = self.node(i, rule, &rule.antecedent)?;
        let consequents = rule
            .consequents
            .iter()
            .map(|term_ref| {
                let (var, term) = self.resolve(i, rule, term_ref)?;
                if self.variables[var].kind() != LinguisticVarKind::Output {
                    return Err(ValidationError::ConsequentIsInput {
                        rule: i,
                        label: rule.name(),
                        var: term_ref.var.clone(),
                    });
                }
                Ok((var, term))
            })
            .collect::<std::result::Result<Vec<_>, ValidationError>>()?;

        Ok(CompiledRule {
            condition,
            consequents,
            weight: rule.weight,
        })
    }

    fn node(
        &self,
        i: usize,
        rule: &Rule,
        expr: &Expr,
    ) -> std::result::Result<Node, ValidationError> {
        Ok(match expr {
            Expr::Is(term_ref) => {
                let (var, term) = self.resolve(i, rule, term_ref)?;
                if self.variables[var].kind() != LinguisticVarKind::Input {
                    return Err(ValidationError::AntecedentIsOutput {
                        rule: i,
                        label: rule.name(),
                        var: term_ref.var.clone(),
                    });
                }
                Node::Term { var, term }
            }
            Expr::And(lhs, rhs, method) => Node::And(
                Box::new(self.node(i, rule, lhs)?),
                Box::new(self.node(i, rule, rhs)?),
                *method,
            ),
            Expr::Or(lhs, rhs, method) => Node::Or(
                Box::new(self.node(i, rule, lhs)?),
                Box::new(self.node(i, rule, rhs)?),
                *method,
            ),
            Expr::Not(inner) => Node::Not(Box::new(self.node(i, rule, inner)?)),
        })
    }

    fn resolve(
        &self,
        i: usize,
        rule: &Rule,
        term_ref: &TermRef,
    ) -> std::result::Result<(usize, usize), ValidationError> {
        let var = *self
            .index
            .get(&term_ref.var)
            .ok_or_else(|| ValidationError::UnknownVariable {
                rule: i,
                label: rule.name(),
                var: term_ref.var.clone(),
            })?;
        let term = self.variables[var]
            .term_index(&term_ref.term)
            .ok_or_else(|| ValidationError::UnknownTerm {
                rule: i,
                label: rule.name(),
                var: term_ref.var.clone(),
                term: term_ref.term.clone(),
            })?;
        Ok((var, term))
    }
}

impl ControlSystem {
    pub fn builder() -> ControlSystemBuilder {
        ControlSystemBuilder::default()
    }

    /// Assemble with the default [`InferenceConfig`].
    pub fn new(variables: Vec<LinguisticVar>, rules: Vec<Rule>) -> Result<Self> {
        ControlSystemBuilder {
            variables,
            rules,
            config: InferenceConfig::default(),
        }
        .build()
    }

    pub fn variables(&self) -> &[LinguisticVar] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVar> {
        self.index.get(name).map(|i| &self.variables[*i])
    }

    pub(crate) fn var_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn inputs(&self) -> impl Iterator<Item = &LinguisticVar> {
        self.variables
            .iter()
            .filter(|v| v.kind() == LinguisticVarKind::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &LinguisticVar> {
        self.outputs.iter().map(|i| &self.variables[*i])
    }

    /// Antecedents read by at least one rule.
    pub fn required_inputs(&self) -> impl Iterator<Item = &LinguisticVar> {
        self.required_inputs.iter().map(|i| &self.variables[*i])
    }
}
