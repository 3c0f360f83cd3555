use std::convert::Infallible;

use crate::traits::CostFunction;
use crate::{DVector, Float};

/// A paraboloid with its minimum moved to `center`.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} (x_i - c_i)^2
/// ```
/// This function has a minimum at $`f(\vec{c}) = 0`$.
#[derive(Debug, Clone)]
pub struct Paraboloid {
    /// The location of the minimum.
    pub center: DVector<Float>,
}
impl Paraboloid {
    /// Create a paraboloid centred on the given coordinates.
    pub fn new<I: IntoIterator<Item = Float>>(center: I) -> Self {
        Self {
            center: DVector::from_vec(center.into_iter().collect()),
        }
    }
}
impl CostFunction<(), Infallible> for Paraboloid {
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        Ok((x - &self.center).norm_squared())
    }
}
