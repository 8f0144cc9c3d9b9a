use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::config::UnknownMethod;

/// Method for defuzzificating an aggregated membership function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DefuzzifyMethod {
    /// Center of gravity over the samples
    #[default]
    #[serde(rename = "centroid")]
    Centroid,
    /// Point splitting the area in two equal halves
    #[serde(rename = "bisector")]
    Bisector,
    /// Mean of the values for which the membership function is maximum
    #[serde(rename = "mom")]
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    #[serde(rename = "som")]
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    #[serde(rename = "lom")]
    LargestOfMaximum,
}

impl DefuzzifyMethod {
    /// Crisp value of `membership` sampled on `universe`, or `None` when nothing is activated.
    pub fn call(self, universe: &[f64], membership: &[f64]) -> Option<f64> {
        debug_assert_eq!(universe.len(), membership.len());

        let mf_sum = membership.iter().sum::<f64>();
        if mf_sum <= 0.0 || !mf_sum.is_finite() {
            return None;
        }

        let value = match self {
            Self::Centroid => centroid(universe, membership, mf_sum),
            Self::Bisector => bisector(universe, membership),
            Self::MeanOfMaximum => {
                let maxima = maxima(universe, membership);
                maxima.iter().sum::<f64>() / maxima.len() as f64
            }
            Self::SmallestOfMaximum => maxima(universe, membership)
                .into_iter()
                .fold(f64::INFINITY, f64::min),
            Self::LargestOfMaximum => maxima(universe, membership)
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max),
        };
        Some(value)
    }
}

fn centroid(universe: &[f64], membership: &[f64], mf_sum: f64) -> f64 {
    let mfweighted_sum = universe
        .iter()
        .zip(membership)
        .fold(0.0, |s, (x, m)| s + x * m);
    mfweighted_sum / mf_sum
}

fn bisector(universe: &[f64], membership: &[f64]) -> f64 {
    if universe.len() < 2 {
        return universe[0];
    }

    // trapezoid between consecutive samples
    let areas = universe
        .windows(2)
        .zip(membership.windows(2))
        .map(|(x, m)| (x[1] - x[0]) * (m[0] + m[1]) / 2.0)
        .collect::<Vec<f64>>();
    let target = areas.iter().sum::<f64>() / 2.0;

    let mut cum_area = 0.0;
    for (i, area) in areas.iter().enumerate() {
        if *area > 0.0 && cum_area + area >= target {
            let fraction = (target - cum_area) / area;
            return universe[i] + fraction * (universe[i + 1] - universe[i]);
        }
        cum_area += area;
    }
    universe[universe.len() - 1]
}

fn maxima(universe: &[f64], membership: &[f64]) -> Vec<f64> {
    let maximum = membership.iter().copied().fold(0.0, f64::max);
    universe
        .iter()
        .zip(membership)
        .filter_map(|(u, m)| if *m == maximum { Some(*u) } else { None })
        .collect()
}

impl FromStr for DefuzzifyMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centroid" => Ok(Self::Centroid),
            "bisector" => Ok(Self::Bisector),
            "mom" => Ok(Self::MeanOfMaximum),
            "som" => Ok(Self::SmallestOfMaximum),
            "lom" => Ok(Self::LargestOfMaximum),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for DefuzzifyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::MeanOfMaximum => "mom",
            Self::SmallestOfMaximum => "som",
            Self::LargestOfMaximum => "lom",
        };
        write!(f, "{}", name)
    }
}
