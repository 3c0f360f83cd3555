use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{core::Point, Float};

/// The direction of an optimization.
///
/// A [`GoalType`] is the only place where "better" is defined: every comparison the optimizer
/// makes between two points or two values goes through it. `NaN` values and unevaluated points
/// always compare as worse than anything else, whichever the direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    /// Lower values are better.
    #[default]
    Minimize,
    /// Higher values are better.
    Maximize,
}

impl GoalType {
    /// Order two function values so that the better one comes first.
    pub fn compare_values(self, a: Float, b: Float) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    Self::Minimize => ordering,
                    Self::Maximize => ordering.reverse(),
                }
            }
        }
    }
    /// Order two points so that the better one comes first (suitable for sorting a simplex).
    pub fn compare(self, a: &Point, b: &Point) -> Ordering {
        match (a.fx, b.fx) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(fa), Some(fb)) => self.compare_values(fa, fb),
        }
    }
    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(self, a: &Point, b: &Point) -> bool {
        self.compare(a, b) == Ordering::Less
    }
    /// Returns `true` if the value `a` is strictly better than the value `b`.
    pub fn is_better_value(self, a: Float, b: Float) -> bool {
        self.compare_values(a, b) == Ordering::Less
    }
}
