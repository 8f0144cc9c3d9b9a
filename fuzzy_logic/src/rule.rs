use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::ops::{AndMethod, OrMethod};

/// A `variable[term]` reference, resolved when the control system is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub var: String,
    pub term: String,
}

impl TermRef {
    pub fn new(var: &str, term: &str) -> Self {
        TermRef {
            var: var.to_string(),
            term: term.to_string(),
        }
    }
}

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.var, self.term)
    }
}

/// Rule condition.
///
/// Operands are combined exactly as the tree is built: `a & b & c` is `(a & b) & c`,
/// and [`Expr::all`] / [`Expr::any`] fold left the same way. Any other grouping has
/// to be spelled out by nesting.
///
/// `And` and `Or` nodes may pin their own method; `None` defers to the
/// [`InferenceConfig`](crate::config::InferenceConfig) of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Is(TermRef),
    And(Box<Expr>, Box<Expr>, Option<AndMethod>),
    Or(Box<Expr>, Box<Expr>, Option<OrMethod>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn term(var: &str, term: &str) -> Self {
        Expr::Is(TermRef::new(var, term))
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs), None)
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs), None)
    }

    /// Conjunction that always uses `method`, whatever the simulation config says.
    pub fn and_with(self, rhs: Expr, method: AndMethod) -> Self {
        Expr::And(Box::new(self), Box::new(rhs), Some(method))
    }

    /// Disjunction that always uses `method`, whatever the simulation config says.
    pub fn or_with(self, rhs: Expr, method: OrMethod) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs), Some(method))
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Left associated conjunction, None for an empty iterator.
    pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Option<Self> {
        exprs.into_iter().reduce(Expr::and)
    }

    /// Left associated disjunction, None for an empty iterator.
    pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Option<Self> {
        exprs.into_iter().reduce(Expr::or)
    }

    /// Every term referenced by the expression, left to right.
    pub fn propositions(&self) -> Vec<&TermRef> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<&'p TermRef>) {
            match expr {
                Expr::Is(term) => out.push(term),
                Expr::And(lhs, rhs, _) | Expr::Or(lhs, rhs, _) => {
                    parse(lhs, out);
                    parse(rhs, out);
                }
                Expr::Not(inner) => parse(inner, out),
            }
        }

        parse(self, &mut props);

        props
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.negate()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // operands that are themselves binary get parentheses
        fn operand(expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match expr {
                Expr::And(..) | Expr::Or(..) => write!(f, "({})", expr),
                _ => write!(f, "{}", expr),
            }
        }

        match self {
            Expr::Is(term) => write!(f, "{}", term),
            Expr::And(lhs, rhs, method) => {
                operand(lhs, f)?;
                match method {
                    Some(method) => write!(f, " AND[{}] ", method)?,
                    None => write!(f, " AND ")?,
                }
                operand(rhs, f)
            }
            Expr::Or(lhs, rhs, method) => {
                operand(lhs, f)?;
                match method {
                    Some(method) => write!(f, " OR[{}] ", method)?,
                    None => write!(f, " OR ")?,
                }
                operand(rhs, f)
            }
            Expr::Not(inner) => {
                write!(f, "NOT ")?;
                operand(inner, f)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Expr,
    pub consequents: Vec<TermRef>,
    pub weight: f64,
    label: Option<String>,
}

impl Rule {
    pub fn new(antecedent: Expr, consequent: TermRef) -> Self {
        Self::with_consequents(antecedent, vec![consequent])
    }

    pub fn with_consequents(antecedent: Expr, consequents: Vec<TermRef>) -> Self {
        Rule {
            antecedent,
            consequents,
            weight: 1.0,
            label: None,
        }
    }

    /// Scale the firing strength, expected in `(0, 1]`.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// The given label, or the rule rendered as `IF .. THEN ..`.
    pub fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN ", self.antecedent)?;
        for (i, consequent) in self.consequents.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", consequent)?;
        }
        if self.weight != 1.0 {
            write!(f, " WITH {}", self.weight)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(var: &str, term: &str) -> Expr {
        Expr::term(var, term)
    }

    #[test]
    fn test_operators_build_tree() {
        let expr = t("a", "x") & t("b", "y") | !t("c", "z");

        assert_eq!(
            expr,
            Expr::Or(
                Box::new(Expr::And(Box::new(t("a", "x")), Box::new(t("b", "y")), None)),
                Box::new(Expr::Not(Box::new(t("c", "z")))),
                None,
            )
        );
    }

    #[test]
    fn test_all_is_left_associated() {
        let chained = Expr::all([t("a", "x"), t("b", "y"), t("c", "z")]).unwrap();
        assert_eq!(chained, (t("a", "x") & t("b", "y")) & t("c", "z"));
        assert_eq!(chained.to_string(), "(a[x] AND b[y]) AND c[z]");

        assert!(Expr::any(Vec::new()).is_none());
        assert_eq!(Expr::any([t("a", "x")]).unwrap(), t("a", "x"));
    }

    #[test]
    fn test_propositions() {
        let expr = t("quality", "poor") | !t("service", "poor");
        let props: Vec<String> = expr.propositions().iter().map(|p| p.to_string()).collect();
        assert_eq!(props, vec!["quality[poor]", "service[poor]"]);
    }

    #[test]
    fn test_rule_name() {
        let rule = Rule::new(
            t("quality", "poor") | t("service", "poor"),
            TermRef::new("tip", "poor"),
        );
        assert_eq!(rule.name(), "IF quality[poor] OR service[poor] THEN tip[poor]");

        let weighted = rule.clone().weight(0.5);
        assert_eq!(weighted.name(), "IF quality[poor] OR service[poor] THEN tip[poor] WITH 0.5");

        let labelled = rule.label("poor tip");
        assert_eq!(labelled.name(), "poor tip");
        assert_eq!(labelled.weight, 1.0);
    }

    #[test]
    fn test_negation_display() {
        let expr = !(t("a", "x") | t("b", "y"));
        assert_eq!(expr.to_string(), "NOT (a[x] OR b[y])");
    }

    #[test]
    fn test_pinned_methods() {
        let expr = t("a", "x").and_with(t("b", "y"), AndMethod::Product) & t("c", "z");
        assert_eq!(expr.to_string(), "(a[x] AND[product] b[y]) AND c[z]");

        let Expr::And(lhs, _, None) = &expr else {
            panic!("outer conjunction should follow the config");
        };
        assert!(matches!(**lhs, Expr::And(_, _, Some(AndMethod::Product))));

        let expr = t("a", "x").or_with(t("b", "y"), OrMethod::ProbabilisticSum);
        assert_eq!(expr.to_string(), "a[x] OR[probabilistic_sum] b[y]");
        assert_eq!(expr.propositions().len(), 2);
    }
}
