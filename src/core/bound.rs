use crate::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An enum that describes a bound/limit on a parameter.
///
/// The simplex optimizer in this crate is unconstrained. [`Bound`]s exist so that a caller can
/// hand over the bounds of a problem and get a clear
/// [`UnsupportedConstraint`](crate::error::SimplexError::UnsupportedConstraint) error rather than
/// having them silently ignored. A [`Bound::NoBound`] constrains nothing and is always accepted.
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Bound {
    #[default]
    /// `(-inf, +inf)`
    NoBound,
    /// `(min, +inf)`
    LowerBound(Float),
    /// `(-inf, max)`
    UpperBound(Float),
    /// `(min, max)`
    LowerAndUpperBound(Float, Float),
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower(), self.upper())
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        assert!(value.0 < value.1);
        match (value.0.is_finite(), value.1.is_finite()) {
            (true, true) => Self::LowerAndUpperBound(value.0, value.1),
            (true, false) => Self::LowerBound(value.0),
            (false, true) => Self::UpperBound(value.1),
            (false, false) => Self::NoBound,
        }
    }
}
impl From<(Option<Float>, Option<Float>)> for Bound {
    fn from(value: (Option<Float>, Option<Float>)) -> Self {
        match (value.0, value.1) {
            (Some(lb), Some(ub)) => {
                assert!(lb < ub);
                Self::LowerAndUpperBound(lb, ub)
            }
            (Some(lb), None) => Self::LowerBound(lb),
            (None, Some(ub)) => Self::UpperBound(ub),
            (None, None) => Self::NoBound,
        }
    }
}

impl Bound {
    /// Returns `true` unless this is [`Bound::NoBound`].
    pub const fn is_constraining(&self) -> bool {
        !matches!(self, Self::NoBound)
    }
    /// Returns the lower bound or `-inf` if there is none.
    pub const fn lower(&self) -> Float {
        match self {
            Self::NoBound | Self::UpperBound(_) => Float::NEG_INFINITY,
            Self::LowerBound(lb) | Self::LowerAndUpperBound(lb, _) => *lb,
        }
    }
    /// Returns the upper bound or `+inf` if there is none.
    pub const fn upper(&self) -> Float {
        match self {
            Self::NoBound | Self::LowerBound(_) => Float::INFINITY,
            Self::UpperBound(ub) | Self::LowerAndUpperBound(_, ub) => *ub,
        }
    }
}
