use crate::{defuzz::DefuzzifyMethod, shape::MembershipFunction, universe::Universe};

/// A fuzzy set sampled on the universe of a linguistic variable.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet<'u> {
    universe: &'u Universe,
    membership: Vec<f64>,
}

impl<'u> FuzzySet<'u> {
    pub fn new(universe: &'u Universe, membership_f: &MembershipFunction) -> Self {
        FuzzySet {
            universe,
            membership: sample(universe, membership_f),
        }
    }

    /// The zero function over `universe`.
    pub fn empty(universe: &'u Universe) -> Self {
        FuzzySet {
            universe,
            membership: vec![0.0; universe.len()],
        }
    }

    pub fn universe(&self) -> &'u Universe {
        self.universe
    }

    pub fn membership(&self) -> &[f64] {
        &self.membership
    }

    /// Iterate `(sample, degree)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe
            .points()
            .iter()
            .copied()
            .zip(self.membership.iter().copied())
    }

    /// Sum of the sampled degrees.
    pub fn activation(&self) -> f64 {
        self.membership.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.iter().all(|m| *m == 0.0)
    }

    /// Return a new FuzzySet whose degrees do not exceed the input value.
    pub fn min(&self, input: f64) -> FuzzySet<'u> {
        FuzzySet {
            universe: self.universe,
            membership: self.membership.iter().map(|m| m.min(input)).collect(),
        }
    }

    /// Return the standard union (max) of the two FuzzySets,
    /// or None if the two FuzzySets have different universes.
    pub fn std_union(&self, set: &FuzzySet) -> Option<FuzzySet<'u>> {
        self.combine(set, f64::max)
    }

    /// Return the standard intersect (min) of the two FuzzySets,
    /// or None if the two FuzzySets have different universes.
    pub fn std_intersect(&self, set: &FuzzySet) -> Option<FuzzySet<'u>> {
        self.combine(set, f64::min)
    }

    fn combine(&self, set: &FuzzySet, op: fn(f64, f64) -> f64) -> Option<FuzzySet<'u>> {
        if self.universe != set.universe {
            return None;
        }
        Some(FuzzySet {
            universe: self.universe,
            membership: self
                .membership
                .iter()
                .zip(set.membership.iter())
                .map(|(a, b)| op(*a, *b))
                .collect(),
        })
    }

    /// In place `self = max(self, min(alpha, membership))`, with `membership` sampled on
    /// the same universe.
    pub(crate) fn union_clipped(&mut self, membership: &[f64], alpha: f64) {
        debug_assert_eq!(self.membership.len(), membership.len());

        for (agg, m) in self.membership.iter_mut().zip(membership) {
            *agg = agg.max(m.min(alpha));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.membership.iter_mut().for_each(|m| *m = 0.0);
    }

    /// Crisp value of the set, None when every degree is 0.
    pub fn defuzz(&self, method: DefuzzifyMethod) -> Option<f64> {
        method.call(self.universe.points(), &self.membership)
    }

    pub fn centroid_defuzz(&self) -> Option<f64> {
        self.defuzz(DefuzzifyMethod::Centroid)
    }
}

pub(crate) fn sample(universe: &Universe, membership_f: &MembershipFunction) -> Vec<f64> {
    universe
        .points()
        .iter()
        .map(|x| membership_f.degree_of(*x))
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::shape::triangle;

    fn universe() -> Universe {
        Universe::new(0.0, 10.0, 0.01).unwrap()
    }

    #[test]
    fn test_centroid_defuzz() {
        let u = universe();
        let s1 = FuzzySet::new(&u, &triangle(2.0, 5.0, 8.0).unwrap());
        assert!(approx_eq!(f64, s1.centroid_defuzz().unwrap(), 5f64, epsilon = 1e-6));
    }

    #[test]
    fn test_min() {
        let u = Universe::new(0.0, 10.0, 1.0).unwrap();
        let s1 = FuzzySet::new(&u, &triangle(3.0, 5.0, 7.0).unwrap());
        let s2 = s1.min(0.5f64);

        assert_eq!(s1.membership()[5], 1.0);
        assert_eq!(s2.membership()[5], 0.5);
        assert_eq!(s2.membership()[4], 0.5);
        assert_eq!(s2.membership()[3], 0.0);
    }

    #[test]
    fn test_union_and_intersect() {
        let u = Universe::new(0.0, 10.0, 1.0).unwrap();
        let low = FuzzySet::new(&u, &triangle(0.0, 0.0, 6.0).unwrap());
        let high = FuzzySet::new(&u, &triangle(4.0, 10.0, 10.0).unwrap());

        let union = low.std_union(&high).unwrap();
        let intersect = low.std_intersect(&high).unwrap();

        assert_eq!(union.membership()[0], 1.0);
        assert_eq!(union.membership()[10], 1.0);
        assert_eq!(intersect.membership()[0], 0.0);
        assert!(intersect.membership()[5] > 0.0);
        assert!(intersect.iter().all(|(x, m)| m <= low.membership()[x as usize]));
    }

    #[test]
    fn test_different_universes() {
        let u1 = Universe::new(0.0, 10.0, 1.0).unwrap();
        let u2 = Universe::new(0.0, 20.0, 1.0).unwrap();
        let f = triangle(0.0, 5.0, 10.0).unwrap();

        assert!(FuzzySet::new(&u1, &f)
            .std_union(&FuzzySet::new(&u2, &f))
            .is_none());
    }

    #[test]
    fn test_union_clipped() {
        let u = Universe::new(0.0, 4.0, 1.0).unwrap();
        let mut agg = FuzzySet::empty(&u);
        assert!(agg.is_empty());
        assert_eq!(agg.centroid_defuzz(), None);

        agg.union_clipped(&[1.0, 0.5, 0.0, 0.0, 0.0], 0.8);
        agg.union_clipped(&[0.0, 0.0, 0.3, 1.0, 0.3], 0.2);

        assert_eq!(agg.membership(), &[0.8, 0.5, 0.2, 0.2, 0.2]);
        assert!(approx_eq!(f64, agg.activation(), 1.9, epsilon = 1e-12));

        agg.clear();
        assert!(agg.is_empty());
    }
}
