use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::config::UnknownMethod;

/// And operator method for combining the propositions of a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndMethod {
    #[default]
    Min,
    Product,
}

impl AndMethod {
    pub fn call(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Min => u.min(v),
            Self::Product => u * v,
        }
    }
}

/// Or operator method for combining the propositions of a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrMethod {
    #[default]
    Max,
    ProbabilisticSum,
}

impl OrMethod {
    pub fn call(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Max => u.max(v),
            Self::ProbabilisticSum => u + v - u * v,
        }
    }
}

impl FromStr for AndMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "product" | "prod" => Ok(Self::Product),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl FromStr for OrMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "probabilistic_sum" | "probor" => Ok(Self::ProbabilisticSum),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for AndMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Product => write!(f, "product"),
        }
    }
}

impl fmt::Display for OrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max => write!(f, "max"),
            Self::ProbabilisticSum => write!(f, "probabilistic_sum"),
        }
    }
}
