use serde::{Deserialize, Serialize};

use crate::{
    defuzz::DefuzzifyMethod,
    ops::{AndMethod, OrMethod},
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown method \"{0}\"")]
pub struct UnknownMethod(pub String);

/// Operators used by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub and_method: AndMethod,
    pub or_method: OrMethod,
    pub defuzzify_method: DefuzzifyMethod,
    /// Clamp crisp inputs to their universe before fuzzification
    pub clip_to_bounds: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            and_method: AndMethod::Min,
            or_method: OrMethod::Max,
            defuzzify_method: DefuzzifyMethod::Centroid,
            clip_to_bounds: true,
        }
    }
}

impl InferenceConfig {
    pub fn with_and(mut self, and_method: AndMethod) -> Self {
        self.and_method = and_method;
        self
    }

    pub fn with_or(mut self, or_method: OrMethod) -> Self {
        self.or_method = or_method;
        self
    }

    pub fn with_defuzzify(mut self, defuzzify_method: DefuzzifyMethod) -> Self {
        self.defuzzify_method = defuzzify_method;
        self
    }

    pub fn with_clip_to_bounds(mut self, clip_to_bounds: bool) -> Self {
        self.clip_to_bounds = clip_to_bounds;
        self
    }
}
