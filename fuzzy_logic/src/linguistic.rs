use serde::{Deserialize, Serialize};

use crate::{
    automf::{automf, automf_with_names},
    error::Result,
    rule::Expr,
    shape::MembershipFunction,
    universe::Universe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LinguisticVarKind {
    /// Antecedent, consumes a crisp input
    #[serde(rename(serialize = "input", deserialize = "input"))]
    Input,
    /// Consequent, produces a crisp output
    #[serde(rename(serialize = "output", deserialize = "output"))]
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub name: String,
    pub membership_f: MembershipFunction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVar {
    name: String,
    kind: LinguisticVarKind,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVar {
    pub fn new(name: &str, kind: LinguisticVarKind, universe: Universe) -> Self {
        LinguisticVar {
            name: name.to_string(),
            kind,
            universe,
            terms: Vec::new(),
        }
    }

    pub fn antecedent(name: &str, universe: Universe) -> Self {
        Self::new(name, LinguisticVarKind::Input, universe)
    }

    pub fn consequent(name: &str, universe: Universe) -> Self {
        Self::new(name, LinguisticVarKind::Output, universe)
    }

    /// Add a term, replacing any existing term with the same name.
    pub fn add_term(&mut self, name: &str, membership_f: MembershipFunction) -> &mut Self {
        match self.terms.iter_mut().find(|t| t.name == name) {
            Some(term) => {
                log::debug!("replacing term \"{}\" of \"{}\"", name, self.name);
                term.membership_f = membership_f;
            }
            None => self.terms.push(Term {
                name: name.to_string(),
                membership_f,
            }),
        }
        self
    }

    pub fn with_term(mut self, name: &str, membership_f: MembershipFunction) -> Self {
        self.add_term(name, membership_f);
        self
    }

    /// Replace the terms with `n` evenly spaced triangles (`poor`, `average`, `good` for 3).
    pub fn automf(&mut self, n: usize) -> Result<&mut Self> {
        let generated = automf(&self.universe, n)?;
        self.replace_terms(generated);
        Ok(self)
    }

    pub fn automf_with_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self> {
        let generated = automf_with_names(&self.universe, names)?;
        self.replace_terms(generated);
        Ok(self)
    }

    fn replace_terms(&mut self, generated: Vec<(String, MembershipFunction)>) {
        self.terms = generated
            .into_iter()
            .map(|(name, membership_f)| Term { name, membership_f })
            .collect();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LinguisticVarKind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.membership_f)
    }

    pub(crate) fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Proposition "`self` is `term`", for building rules.
    pub fn is(&self, term: &str) -> Expr {
        Expr::term(&self.name, term)
    }

    /// Degree of `x` in every term, in declaration order.
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.membership_f.degree_of(x)))
            .collect()
    }
}
