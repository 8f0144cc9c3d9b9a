use crate::error::{FuzzyError, Result};

/// Largest number of samples a universe may hold.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Discretisation grid of a linguistic variable.
///
/// Samples are strictly increasing and always lie within `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    points: Vec<f64>,
}

impl Universe {
    /// Sample `[min, max]` every `step`. `max` is included when it falls on the grid.
    ///
    /// Fails when the grid would exceed [`MAX_SAMPLES`] or `step` vanishes next to `min`.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min >= max || step <= 0.0 {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }
        let n = match sample_count(min, max, step) {
            Some(n) if min + step > min => n,
            _ => return Err(FuzzyError::InvalidUniverse { min, max, step }),
        };

        Ok(Universe {
            min,
            max,
            step,
            points: grid(min, max, step, n),
        })
    }

    /// `n` evenly spaced samples, both bounds included.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self> {
        if !(2..=MAX_SAMPLES).contains(&n) {
            return Err(FuzzyError::InvalidUniverse {
                min,
                max,
                step: f64::NAN,
            });
        }
        let step = (max - min) / (n - 1) as f64;
        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min >= max {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let points = (0..n)
            .map(|i| if i == n - 1 { max } else { min + i as f64 * step })
            .collect();
        Ok(Universe {
            min,
            max,
            step,
            points,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Nearest value of `[min, max]`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

fn sample_count(start: f64, stop: f64, interval: f64) -> Option<usize> {
    // tolerate accumulated error on the last sample
    let n = ((stop - start) / interval + 1e-9).floor() + 1.0;
    if n.is_finite() && (1.0..=MAX_SAMPLES as f64).contains(&n) {
        Some(n as usize)
    } else {
        None
    }
}

fn grid(start: f64, stop: f64, interval: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (start + i as f64 * interval).min(stop))
        .collect::<Vec<f64>>()
}

/// `start, start + interval, ...` up to and including `stop` when it lies on the grid.
///
/// Empty when the range is empty or would hold more than [`MAX_SAMPLES`] values.
pub fn arange(start: f64, stop: f64, interval: f64) -> Vec<f64> {
    match sample_count(start, stop, interval) {
        Some(n) => grid(start, stop, interval, n),
        None => Vec::new(),
    }
}
