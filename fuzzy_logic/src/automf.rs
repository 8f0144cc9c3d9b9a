//! Evenly spaced partition of a universe into triangular terms.

use crate::error::{FuzzyError, Result};
use crate::shape::{triangle, MembershipFunction};
use crate::universe::Universe;

const THREE: &[&str] = &["poor", "average", "good"];
const FIVE: &[&str] = &["poor", "mediocre", "average", "decent", "good"];
const SEVEN: &[&str] = &[
    "dismal", "poor", "mediocre", "average", "decent", "good", "excellent",
];

/// Default term names for `n` generated terms, lowest first.
pub fn default_names(n: usize) -> Option<&'static [&'static str]> {
    match n {
        3 => Some(THREE),
        5 => Some(FIVE),
        7 => Some(SEVEN),
        _ => None,
    }
}

/// Generate `n` terms named after [`default_names`].
pub fn automf(universe: &Universe, n: usize) -> Result<Vec<(String, MembershipFunction)>> {
    let names = default_names(n).ok_or(FuzzyError::AutoMf(n))?;
    automf_with_names(universe, names)
}

/// One triangle per name. Centres are evenly spaced over `[min, max]` and
/// neighbouring triangles cross at 0.5, so the outer terms reach past the bounds.
pub fn automf_with_names<S: AsRef<str>>(
    universe: &Universe,
    names: &[S],
) -> Result<Vec<(String, MembershipFunction)>> {
    let n = names.len();
    if n < 2 {
        return Err(FuzzyError::AutoMf(n));
    }

    let (min, max) = (universe.min(), universe.max());
    let width = (max - min) / ((n - 1) as f64 / 2.0);
    let spacing = (max - min) / (n - 1) as f64;

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let center = if i == n - 1 { max } else { min + i as f64 * spacing };
            let f = triangle(center - width / 2.0, center, center + width / 2.0)?;
            Ok((name.as_ref().to_string(), f))
        })
        .collect()
}
