use std::convert::Infallible;

use crate::traits::CostFunction;
use crate::{DVector, Float};

/// A sum of two Gaussian wells: a narrow, shallow one at the origin and a broad, deep one
/// elsewhere.
///
/// ```math
/// f(\vec{x}) = -a_1 \exp\left(-\frac{|\vec{x}|^2}{w_1}\right) - a_2 \exp\left(-\frac{|\vec{x} - \vec{c}|^2}{w_2}\right)
/// ```
/// The default wells are $`a_1 = 1, w_1 = 0.1`$ at the origin and $`a_2 = 2, w_2 = 1.5`$ at
/// $`\vec{c} = (1.2, \ldots, 1.2)`$. A local search started near the origin stops in the shallow
/// well (value close to $`-1.3`$) while the global minimum lies close to $`\vec{c}`$ with a value
/// close to $`-2`$.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoWells {
    /// The depth of the well at the origin.
    pub shallow_depth: Float,
    /// The width of the well at the origin.
    pub shallow_width: Float,
    /// The depth of the second well.
    pub deep_depth: Float,
    /// The width of the second well.
    pub deep_width: Float,
    /// The coordinate of the second well along every axis.
    pub deep_center: Float,
}
impl Default for TwoWells {
    fn default() -> Self {
        Self {
            shallow_depth: 1.0,
            shallow_width: 0.1,
            deep_depth: 2.0,
            deep_width: 1.5,
            deep_center: 1.2,
        }
    }
}
impl CostFunction<(), Infallible> for TwoWells {
    fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
        let r_shallow = x.norm_squared();
        let r_deep = x.map(|v| v - self.deep_center).norm_squared();
        Ok(-self.shallow_depth * Float::exp(-r_shallow / self.shallow_width)
            - self.deep_depth * Float::exp(-r_deep / self.deep_width))
    }
}
