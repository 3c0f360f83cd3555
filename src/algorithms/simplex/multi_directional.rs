use serde::{Deserialize, Serialize};

use crate::{
    algorithms::simplex::{sort_points, StepKind},
    core::{CountingObjective, GoalType, Point},
    error::SimplexResult,
    traits::CostFunction,
    Float,
};

/// Torczon's multi-directional update step.
///
/// Every vertex but the best $`\vec{x}_l`$ is moved at once to $`\vec{x}_l + c (\vec{x}_l -
/// \vec{x}_i)`$:
///
/// 1. **Reflection** ($`c = 1`$). If the best reflected vertex improves on $`\vec{x}_l`$, also try
///    the **expansion** ($`c = \chi`$) and keep whichever simplex has the better best vertex
///    (the reflected one on ties).
/// 2. Otherwise **contract** ($`c = -\gamma`$), pulling every vertex towards $`\vec{x}_l`$.
///
/// Each iteration therefore costs exactly $`2n`$ evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiDirectionalStep {
    khi: Float,
    gamma: Float,
}

impl Default for MultiDirectionalStep {
    fn default() -> Self {
        Self {
            khi: 2.0,
            gamma: 0.5,
        }
    }
}

impl MultiDirectionalStep {
    /// Set the expansion coefficient $`\chi`$ (default = `2`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\chi <= 1`$.
    pub fn with_khi(mut self, value: Float) -> Self {
        assert!(value > 1.0);
        self.khi = value;
        self
    }
    /// Set the contraction coefficient $`\gamma`$ (default = `0.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\gamma >= 1`$ or $`\gamma <= 0`$.
    pub fn with_gamma(mut self, value: Float) -> Self {
        assert!(value > 0.0);
        assert!(value < 1.0);
        self.gamma = value;
        self
    }
    /// The expansion and contraction coefficients.
    pub const fn coefficients(&self) -> (Float, Float) {
        (self.khi, self.gamma)
    }

    pub(crate) fn iterate<P, U, E>(
        &self,
        points: &mut [Point],
        objective: &mut CountingObjective<'_, P, U, E>,
        goal: GoalType,
    ) -> SimplexResult<StepKind, E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        let original = points.to_vec();
        let reflected = transform(&original, 1.0, objective, goal)?;
        if goal.is_better(&reflected[0], &original[0]) {
            let expanded = transform(&original, self.khi, objective, goal)?;
            if goal.is_better(&expanded[0], &reflected[0]) {
                points.clone_from_slice(&expanded);
                return Ok(StepKind::MultiExpand);
            }
            points.clone_from_slice(&reflected);
            return Ok(StepKind::MultiReflect);
        }
        let contracted = transform(&original, -self.gamma, objective, goal)?;
        points.clone_from_slice(&contracted);
        Ok(StepKind::MultiContract)
    }
}

/// Build the simplex with every non-best vertex moved to `best + coefficient * (best - vertex)`,
/// evaluate the new vertices, and sort it.
fn transform<P, U, E>(
    original: &[Point],
    coefficient: Float,
    objective: &mut CountingObjective<'_, P, U, E>,
    goal: GoalType,
) -> SimplexResult<Vec<Point>, E>
where
    P: CostFunction<U, E> + ?Sized,
{
    let anchor = &original[0];
    let mut points = Vec::with_capacity(original.len());
    points.push(anchor.clone());
    for vertex in &original[1..] {
        let mut moved = Point::from(&anchor.x + (&anchor.x - &vertex.x).scale(coefficient));
        moved.evaluate(objective)?;
        points.push(moved);
    }
    sort_points(&mut points, goal);
    Ok(points)
}
