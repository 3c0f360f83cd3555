use crate::{
    core::CountingObjective, error::SimplexResult, traits::CostFunction, DVector, Float,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Describes a point in parameter space along with its (possibly pending) function value.
///
/// Coordinates are fixed at construction: every geometric move of the simplex builds new points
/// rather than moving old ones, so a value attached to a point always belongs to its coordinates.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}

impl Point {
    /// Create a point which already carries a function value.
    pub const fn evaluated(x: DVector<Float>, fx: Float) -> Self {
        Self { x, fx: Some(fx) }
    }
    /// The coordinates of the point.
    pub const fn x(&self) -> &DVector<Float> {
        &self.x
    }
    /// The function value of the point, if it has been evaluated.
    pub const fn fx(&self) -> Option<Float> {
        self.fx
    }
    /// Returns `true` once a function value has been attached.
    pub const fn is_evaluated(&self) -> bool {
        self.fx.is_some()
    }
    /// The number of coordinates.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Convert the [`Point`] into a `DVector`-`Float` tuple.
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        let fx = self.fx_checked();
        (self.x, fx)
    }
    /// Get the current evaluation of the point, if it has been evaluated
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn fx_checked(&self) -> Float {
        #[allow(clippy::expect_used)]
        self.fx.expect("Point value requested before evaluation")
    }
    /// Evaluate the objective at the point's coordinates and attach the result.
    ///
    /// A point which already has a value is left untouched and costs no evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation budget of the objective is exhausted or if the cost
    /// function itself fails.
    pub fn evaluate<P, U, E>(
        &mut self,
        objective: &mut CountingObjective<'_, P, U, E>,
    ) -> SimplexResult<(), E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        if self.fx.is_none() {
            self.fx = Some(objective.evaluate(&self.x)?);
        }
        Ok(())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let coords: Vec<String> = self.x.iter().map(|v| format!("{v}")).collect();
        match self.fx {
            Some(fx) => write!(f, "[{}] -> {}", coords.join(", "), fx),
            None => write!(f, "[{}] -> ?", coords.join(", ")),
        }
    }
}

impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
