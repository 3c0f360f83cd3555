use serde::{Deserialize, Serialize};

use crate::{core::Point, traits::ConvergenceChecker, Float};

fn within_tolerance(previous: Float, current: Float, rel: Float, abs: Float) -> bool {
    let difference = (previous - current).abs();
    let size = Float::max(previous.abs(), current.abs());
    difference <= size * rel || difference <= abs
}

/// A [`ConvergenceChecker`] which compares the function values of two points.
///
/// A pair converges when
/// ```math
/// |f_p - f_c| \le \max(|f_p|, |f_c|)\,\varepsilon_\text{rel} \quad\text{or}\quad |f_p - f_c| \le \varepsilon_\text{abs}
/// ```
/// or, if a maximum iteration count was given, once that iteration is reached. Unevaluated points
/// never converge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleValueChecker {
    rel: Float,
    abs: Float,
    max_iter: Option<usize>,
}

impl Default for SimpleValueChecker {
    fn default() -> Self {
        Self::new(100.0 * Float::EPSILON, 100.0 * Float::MIN_POSITIVE)
    }
}

impl SimpleValueChecker {
    /// Create a checker with relative and absolute thresholds.
    ///
    /// # Panics
    ///
    /// This method will panic if either threshold is negative or NaN.
    pub fn new(rel: Float, abs: Float) -> Self {
        assert!(rel >= 0.0);
        assert!(abs >= 0.0);
        Self {
            rel,
            abs,
            max_iter: None,
        }
    }
    /// Force convergence once `max_iter` iterations have been completed.
    ///
    /// # Panics
    ///
    /// This method will panic if `max_iter` is zero.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        assert!(max_iter > 0);
        self.max_iter = Some(max_iter);
        self
    }
    /// The relative threshold.
    pub const fn relative_threshold(&self) -> Float {
        self.rel
    }
    /// The absolute threshold.
    pub const fn absolute_threshold(&self) -> Float {
        self.abs
    }
}

impl ConvergenceChecker for SimpleValueChecker {
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool {
        if self.max_iter.map_or(false, |max_iter| iteration >= max_iter) {
            return true;
        }
        match (previous.fx, current.fx) {
            (Some(p), Some(c)) => within_tolerance(p, c, self.rel, self.abs),
            _ => false,
        }
    }
}

/// A [`ConvergenceChecker`] which compares the coordinates of two points.
///
/// A pair converges when every coordinate passes the same relative-or-absolute test as
/// [`SimpleValueChecker`], or once the optional maximum iteration is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplePointChecker {
    rel: Float,
    abs: Float,
    max_iter: Option<usize>,
}

impl Default for SimplePointChecker {
    fn default() -> Self {
        Self::new(100.0 * Float::EPSILON, 100.0 * Float::MIN_POSITIVE)
    }
}

impl SimplePointChecker {
    /// Create a checker with relative and absolute thresholds.
    ///
    /// # Panics
    ///
    /// This method will panic if either threshold is negative or NaN.
    pub fn new(rel: Float, abs: Float) -> Self {
        assert!(rel >= 0.0);
        assert!(abs >= 0.0);
        Self {
            rel,
            abs,
            max_iter: None,
        }
    }
    /// Force convergence once `max_iter` iterations have been completed.
    ///
    /// # Panics
    ///
    /// This method will panic if `max_iter` is zero.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        assert!(max_iter > 0);
        self.max_iter = Some(max_iter);
        self
    }
}

impl ConvergenceChecker for SimplePointChecker {
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool {
        if self.max_iter.map_or(false, |max_iter| iteration >= max_iter) {
            return true;
        }
        previous.x.len() == current.x.len()
            && previous
                .x
                .iter()
                .zip(current.x.iter())
                .all(|(&p, &c)| within_tolerance(p, c, self.rel, self.abs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DVector;

    fn p(x: &[Float], fx: Float) -> Point {
        Point::evaluated(DVector::from_column_slice(x), fx)
    }

    #[test]
    fn test_value_checker() {
        let checker = SimpleValueChecker::new(1e-3, 1e-8);
        assert!(checker.converged(1, &p(&[0.0], 1000.0), &p(&[5.0], 1000.5)));
        assert!(!checker.converged(1, &p(&[0.0], 1.0), &p(&[0.0], 1.1)));
        assert!(checker.converged(1, &p(&[0.0], 0.0), &p(&[0.0], 1e-9)));
        assert!(!checker.converged(1, &p(&[0.0], 0.0), &Point::from(vec![0.0])));
    }

    #[test]
    fn test_point_checker() {
        let checker = SimplePointChecker::new(1e-6, 1e-10);
        assert!(checker.converged(1, &p(&[1.0, 2.0], 0.0), &p(&[1.0, 2.0], 5.0)));
        assert!(!checker.converged(1, &p(&[1.0, 2.0], 0.0), &p(&[1.0, 2.1], 0.0)));
        assert!(checker.converged(1, &p(&[0.0, 0.0], 0.0), &p(&[1e-11, 0.0], 0.0)));
    }

    #[test]
    fn test_max_iter_forces_convergence() {
        let checker = SimpleValueChecker::new(0.0, 0.0).with_max_iter(5);
        let (a, b) = (p(&[0.0], 0.0), p(&[0.0], 1.0));
        assert!(!checker.converged(4, &a, &b));
        assert!(checker.converged(5, &a, &b));
        let checker = SimplePointChecker::new(0.0, 0.0).with_max_iter(2);
        assert!(checker.converged(2, &p(&[0.0], 0.0), &p(&[1.0], 0.0)));
    }

    #[test]
    #[should_panic]
    fn test_negative_threshold_panics() {
        let _ = SimpleValueChecker::new(-1.0, 0.0);
    }
}
