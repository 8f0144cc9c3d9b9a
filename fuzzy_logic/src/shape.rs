use crate::error::{FuzzyError, Result};

/// Membership function of a single linguistic term.
///
/// Evaluation is total: any real input maps into `[0, 1]`, NaN maps to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    Triangle { a: f64, b: f64, c: f64 },
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// Generalised bell `1 / (1 + |(x - c) / a|^(2b))`
    Bell { a: f64, b: f64, c: f64 },
    Gaussian { mean: f64, sigma: f64 },
}

pub fn triangle(a: f64, b: f64, c: f64) -> Result<MembershipFunction> {
    check_ordered("triangle", &[a, b, c])?;
    Ok(MembershipFunction::Triangle { a, b, c })
}

pub fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> Result<MembershipFunction> {
    check_ordered("trapezoid", &[a, b, c, d])?;
    Ok(MembershipFunction::Trapezoid { a, b, c, d })
}

pub fn bell(a: f64, b: f64, c: f64) -> Result<MembershipFunction> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) || a == 0.0 || b <= 0.0 {
        return Err(FuzzyError::InvalidShape {
            shape: "bell",
            parameters: vec![a, b, c],
        });
    }
    Ok(MembershipFunction::Bell { a, b, c })
}

pub fn gaussian(mean: f64, sigma: f64) -> Result<MembershipFunction> {
    if !(mean.is_finite() && sigma.is_finite()) || sigma <= 0.0 {
        return Err(FuzzyError::InvalidShape {
            shape: "gaussian",
            parameters: vec![mean, sigma],
        });
    }
    Ok(MembershipFunction::Gaussian { mean, sigma })
}

fn check_ordered(shape: &'static str, points: &[f64]) -> Result<()> {
    let finite = points.iter().all(|p| p.is_finite());
    let ordered = points.windows(2).all(|w| w[0] <= w[1]);
    if finite && ordered {
        return Ok(());
    }
    Err(FuzzyError::InvalidShape {
        shape,
        parameters: points.to_vec(),
    })
}

/// Piecewise linear ramp up on `[a, b]`, plateau on `[b, c]`, ramp down on `[c, d]`.
fn linear(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.0
    } else if x < b {
        (x - a) / (b - a)
    } else if x <= c {
        1.0
    } else {
        (d - x) / (d - c)
    }
}

impl MembershipFunction {
    /// Return the degree of membership of the input value.
    pub fn degree_of(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }

        let result = match *self {
            Self::Triangle { a, b, c } => linear(x, a, b, b, c),
            Self::Trapezoid { a, b, c, d } => linear(x, a, b, c, d),
            Self::Bell { a, b, c } => 1.0 / (1.0 + ((x - c) / a).abs().powf(2.0 * b)),
            Self::Gaussian { mean, sigma } => (-(x - mean).powi(2) / (2.0 * sigma * sigma)).exp(),
        };
        result.min(1f64).max(0f64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangle { .. } => "triangle",
            Self::Trapezoid { .. } => "trapezoid",
            Self::Bell { .. } => "bell",
            Self::Gaussian { .. } => "gaussian",
        }
    }

    /// Defining parameters, in constructor order.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::Triangle { a, b, c } => vec![a, b, c],
            Self::Trapezoid { a, b, c, d } => vec![a, b, c, d],
            Self::Bell { a, b, c } => vec![a, b, c],
            Self::Gaussian { mean, sigma } => vec![mean, sigma],
        }
    }

    /// Closed interval outside of which the degree is 0.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangle { a, c, .. } => (a, c),
            Self::Trapezoid { a, d, .. } => (a, d),
            Self::Bell { .. } | Self::Gaussian { .. } => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rand::Rng;

    use super::*;

    #[test]
    fn test_triangle_degree() {
        let f = triangle(2.0, 5.0, 8.0).unwrap();

        assert_eq!(f.degree_of(5.0), 1.0);
        assert_eq!(f.degree_of(3.5), 0.5);
        assert_eq!(f.degree_of(6.5), 0.5);
        assert_eq!(f.degree_of(2.0), 0.0);
        assert_eq!(f.degree_of(8.0), 0.0);
        assert_eq!(f.degree_of(-1.0), 0.0);
        assert_eq!(f.degree_of(11.0), 0.0);
    }

    #[test]
    fn test_shoulders() {
        // left and right shoulders of the tipping output
        let poor = triangle(0.0, 0.0, 13.0).unwrap();
        let good = triangle(0.0, 25.0, 25.0).unwrap();

        assert_eq!(poor.degree_of(0.0), 1.0);
        assert!(approx_eq!(f64, poor.degree_of(6.5), 0.5, epsilon = 1e-12));
        assert_eq!(poor.degree_of(-0.5), 0.0);
        assert_eq!(good.degree_of(25.0), 1.0);
        assert_eq!(good.degree_of(25.5), 0.0);
        assert_eq!(good.degree_of(5.0), 0.2);
    }

    #[test]
    fn test_trapezoid_degree() {
        let normal = trapezoid(30.0, 45.0, 75.0, 90.0).unwrap();

        assert_eq!(normal.degree_of(45.0), 1.0);
        assert_eq!(normal.degree_of(60.0), 1.0);
        assert_eq!(normal.degree_of(75.0), 1.0);
        assert!(approx_eq!(f64, normal.degree_of(40.0), 2.0 / 3.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, normal.degree_of(85.0), 1.0 / 3.0, epsilon = 1e-12));
        assert_eq!(normal.degree_of(29.9), 0.0);
        assert_eq!(normal.degree_of(90.1), 0.0);
    }

    #[test]
    fn test_degenerate_triangle() {
        let spike = triangle(3.0, 3.0, 3.0).unwrap();
        assert_eq!(spike.degree_of(3.0), 1.0);
        assert_eq!(spike.degree_of(3.0001), 0.0);
    }

    #[test]
    fn test_unordered_rejected() {
        assert!(triangle(5.0, 2.0, 8.0).is_err());
        assert!(trapezoid(0.0, 2.0, 1.0, 3.0).is_err());
        assert!(triangle(0.0, f64::NAN, 1.0).is_err());
        assert!(bell(0.0, 2.0, 1.0).is_err());
        assert!(gaussian(0.0, 0.0).is_err());
    }

    #[test]
    fn test_bell_and_gaussian() {
        let b = bell(2.0, 4.0, 6.0).unwrap();
        assert_eq!(b.degree_of(6.0), 1.0);
        assert!(approx_eq!(f64, b.degree_of(8.0), 0.5, epsilon = 1e-12));
        assert!(approx_eq!(f64, b.degree_of(4.0), 0.5, epsilon = 1e-12));

        let g = gaussian(0.0, 1.0).unwrap();
        assert_eq!(g.degree_of(0.0), 1.0);
        assert!(approx_eq!(f64, g.degree_of(1.0), (-0.5f64).exp(), epsilon = 1e-12));
    }

    #[test]
    fn test_peaks_and_outside_support() {
        let mut rng = rand::thread_rng();

        for _ in 0..500 {
            let mut p: Vec<f64> = (0..4).map(|_| rng.gen_range(-50.0..50.0)).collect();
            p.sort_by(f64::total_cmp);

            let tri = triangle(p[0], p[1], p[3]).unwrap();
            let trap = trapezoid(p[0], p[1], p[2], p[3]).unwrap();

            assert_eq!(tri.degree_of(p[1]), 1.0);
            assert_eq!(trap.degree_of(p[1]), 1.0);
            assert_eq!(trap.degree_of(p[2]), 1.0);
            assert_eq!(tri.degree_of(p[0] - 0.5), 0.0);
            assert_eq!(tri.degree_of(p[3] + 0.5), 0.0);
            assert_eq!(trap.degree_of(p[0] - 0.5), 0.0);
            assert_eq!(trap.degree_of(p[3] + 0.5), 0.0);

            let x = rng.gen_range(-100.0..100.0);
            assert!((0.0..=1.0).contains(&tri.degree_of(x)));
            assert!((0.0..=1.0).contains(&trap.degree_of(x)));
        }
    }

    #[test]
    fn test_nan_input() {
        let f = trapezoid(0.0, 1.0, 2.0, 3.0).unwrap();
        assert_eq!(f.degree_of(f64::NAN), 0.0);
    }

    #[test]
    fn test_parameters() {
        let f = trapezoid(0.0, 1.0, 2.0, 3.0).unwrap();
        assert_eq!(f.name(), "trapezoid");
        assert_eq!(f.parameters(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(f.support(), (0.0, 3.0));
    }
}
