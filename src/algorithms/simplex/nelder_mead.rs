use serde::{Deserialize, Serialize};

use crate::{
    algorithms::simplex::{centroid, replace_worst, sort_points, StepKind},
    core::{CountingObjective, GoalType, Point},
    error::SimplexResult,
    traits::CostFunction,
    Float,
};

/// Selects the expansion method used in the Nelder-Mead algorithm. See Lagarias et al.[^1] for more details.
///
/// [^1]: [J. C. Lagarias, J. A. Reeds, M. H. Wright, and P. E. Wright, ‘Convergence Properties of the Nelder--Mead Simplex Method in Low Dimensions’, SIAM Journal on Optimization, vol. 9, no. 1, pp. 112–147, 1998.](https://doi.org/10.1137/S1052623496303470)
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplexExpansionMethod {
    /// Greedy minimization will calculate both a reflected an expanded point in an expansion step
    /// but will keep the one with the better value.
    #[default]
    GreedyMinimization,
    /// Greedy expansion will calculate both a reflected and expanded point in an expansion step
    /// but will keep the expanded point always, even if the reflected point is better.
    GreedyExpansion,
}

/// The reflect/expand/contract/shrink update step of Nelder and Mead.
///
/// Each iteration works on the simplex sorted best first, with worst vertex $`\vec{x}_h`$, second
/// worst $`\vec{x}_s`$, best $`\vec{x}_l`$, and the centroid $`\vec{x}_o`$ of all but the worst:
///
/// 1. **Reflection**: compute $`\vec{x}_r = \vec{x}_o + \rho (\vec{x}_o - \vec{x}_h)`$. If
///    $`\vec{x}_r`$ is not better than $`\vec{x}_l`$ but better than $`\vec{x}_s`$, it replaces
///    $`\vec{x}_h`$.
/// 2. **Expansion**: if $`\vec{x}_r`$ is better than $`\vec{x}_l`$, compute
///    $`\vec{x}_e = \vec{x}_o + \chi (\vec{x}_r - \vec{x}_o)`$ and replace $`\vec{x}_h`$ according
///    to the [`SimplexExpansionMethod`].
/// 3. **Outside contraction**: if $`\vec{x}_r`$ is better than $`\vec{x}_h`$, compute
///    $`\vec{x}_c = \vec{x}_o + \gamma (\vec{x}_r - \vec{x}_o)`$ and accept it if it is at least as
///    good as $`\vec{x}_r`$.
/// 4. **Inside contraction**: otherwise compute $`\vec{x}_c = \vec{x}_o - \gamma (\vec{x}_o -
///    \vec{x}_h)`$ and accept it if it is better than $`\vec{x}_h`$.
/// 5. **Shrink**: if no contraction was accepted, replace every vertex but the best with
///    $`\vec{x}_l + \sigma (\vec{x}_i - \vec{x}_l)`$.
///
/// A reflection costs one evaluation, an expansion or accepted contraction two, and a shrink
/// $`n + 2`$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelderMeadStep {
    rho: Float,
    khi: Float,
    gamma: Float,
    sigma: Float,
    expansion_method: SimplexExpansionMethod,
}

impl Default for NelderMeadStep {
    fn default() -> Self {
        Self {
            rho: 1.0,
            khi: 2.0,
            gamma: 0.5,
            sigma: 0.5,
            expansion_method: SimplexExpansionMethod::default(),
        }
    }
}

impl NelderMeadStep {
    /// Set the reflection coefficient $`\rho`$ (default = `1`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\rho <= 0`$.
    pub fn with_rho(mut self, value: Float) -> Self {
        assert!(value > 0.0);
        self.rho = value;
        self
    }
    /// Set the expansion coefficient $`\chi`$ (default = `2`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\chi <= 1`$ or $`\chi <= \rho`$.
    pub fn with_khi(mut self, value: Float) -> Self {
        assert!(value > 1.0);
        assert!(value > self.rho);
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
    /// Set the shrink coefficient $`\sigma`$ (default = `0.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\sigma >= 1`$ or $`\sigma <= 0`$.
    pub fn with_sigma(mut self, value: Float) -> Self {
        assert!(value > 0.0);
        assert!(value < 1.0);
        self.sigma = value;
        self
    }
    /// A set of adaptive hyperparameters according to Gao and Han[^1]. This method, dubbed ANMS
    /// for Adaptive Nelder-Mead Simplex, is identical to the standard step when the input
    /// dimension is equal to 2 and tends to need fewer evaluations for dimensions greater than 10.
    ///
    /// # Panics
    ///
    /// This method will panic if $`n < 2`$, where the shrink coefficient would vanish.
    ///
    /// [^1]: [Gao, F., Han, L. Implementing the Nelder-Mead simplex algorithm with adaptive parameters. *Comput Optim Appl* **51**, 259–277 (2012).](https://doi.org/10.1007/s10589-010-9329-3)
    pub fn with_adaptive(mut self, n: usize) -> Self {
        assert!(n >= 2);
        let n = n as Float;
        self.rho = 1.0;
        self.khi = 1.0 + (2.0 / n);
        self.gamma = 0.75 - 1.0 / (2.0 * n);
        self.sigma = 1.0 - 1.0 / n;
        self
    }
    /// Set the [`SimplexExpansionMethod`].
    pub const fn with_expansion_method(mut self, method: SimplexExpansionMethod) -> Self {
        self.expansion_method = method;
        self
    }
    /// The reflection, expansion, contraction, and shrink coefficients, in that order.
    pub const fn coefficients(&self) -> (Float, Float, Float, Float) {
        (self.rho, self.khi, self.gamma, self.sigma)
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
        let n = points.len() - 1;
        let c = centroid(points);
        let mut xr = Point::from(&c + (&c - &points[n].x).scale(self.rho));
        xr.evaluate(objective)?;
        if !goal.is_better(&xr, &points[0]) && goal.is_better(&xr, &points[n - 1]) {
            replace_worst(points, xr, goal);
            return Ok(StepKind::Reflect);
        }
        if goal.is_better(&xr, &points[0]) {
            let mut xe = Point::from(&c + (&xr.x - &c).scale(self.khi));
            xe.evaluate(objective)?;
            let accepted = match self.expansion_method {
                SimplexExpansionMethod::GreedyMinimization => {
                    if goal.is_better(&xe, &xr) {
                        xe
                    } else {
                        xr
                    }
                }
                SimplexExpansionMethod::GreedyExpansion => xe,
            };
            replace_worst(points, accepted, goal);
            return Ok(StepKind::Expand);
        }
        if goal.is_better(&xr, &points[n]) {
            let mut xc = Point::from(&c + (&xr.x - &c).scale(self.gamma));
            xc.evaluate(objective)?;
            if !goal.is_better(&xr, &xc) {
                replace_worst(points, xc, goal);
                return Ok(StepKind::ContractOutside);
            }
        } else {
            let mut xc = Point::from(&c - (&c - &points[n].x).scale(self.gamma));
            xc.evaluate(objective)?;
            if goal.is_better(&xc, &points[n]) {
                replace_worst(points, xc, goal);
                return Ok(StepKind::ContractInside);
            }
        }
        let xl = points[0].x.clone();
        for p in points.iter_mut().skip(1) {
            let mut shrunk = Point::from(&xl + (&p.x - &xl).scale(self.sigma));
            shrunk.evaluate(objective)?;
            *p = shrunk;
        }
        sort_points(points, goal);
        Ok(StepKind::Shrink)
    }
}
