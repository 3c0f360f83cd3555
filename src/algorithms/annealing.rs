use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::{
    algorithms::simplex::Simplex,
    core::{CountingObjective, GoalType, Point},
    error::{SimplexError, SimplexResult},
    traits::{CostFunction, TemperatureSchedule, UniformSource},
    DVector, Float,
};

/// Closed-form cooling schedules for [`SimulatedAnnealing`].
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: $`T_k = T_0 \alpha^k`$.
    ///
    /// Most widely used. Typical `alpha`: 0.95 to 0.99.
    Geometric {
        /// The temperature at iteration `0`.
        initial: Float,
        /// Cooling factor in `(0, 1)`. Higher = slower cooling.
        alpha: Float,
    },
    /// Linear cooling: $`T_k = T_0 (1 - k / K)`$, reaching zero at iteration $`K`$ and staying
    /// there.
    Linear {
        /// The temperature at iteration `0`.
        initial: Float,
        /// The iteration $`K`$ at which the temperature reaches zero.
        horizon: usize,
    },
    /// Lundy-Mees cooling: $`T_{k+1} = T_k / (1 + \beta T_k)`$, i.e.
    /// $`T_k = T_0 / (1 + k \beta T_0)`$.
    ///
    /// Cools fast at high temperature and slowly at low temperature.
    LundyMees {
        /// The temperature at iteration `0`.
        initial: Float,
        /// Cooling parameter.
        beta: Float,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self::Geometric {
            initial: 1.0,
            alpha: 0.95,
        }
    }
}

impl TemperatureSchedule for CoolingSchedule {
    fn temperature(&self, iteration: usize) -> Float {
        let k = iteration as Float;
        match *self {
            Self::Geometric { initial, alpha } => initial * alpha.powf(k),
            Self::Linear { initial, horizon } => {
                if iteration >= horizon {
                    0.0
                } else {
                    initial * (1.0 - k / horizon as Float)
                }
            }
            Self::LundyMees { initial, beta } => initial / (1.0 + k * beta * initial),
        }
    }
}

/// The record of one annealing decision, as reported to
/// [`Observer::observe_annealing`](crate::traits::Observer::observe_annealing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingDecision {
    /// The iteration at which the decision was made.
    pub iteration: usize,
    /// The temperature at that iteration.
    pub temperature: Float,
    /// The value of the vertex which would be replaced.
    pub current: Float,
    /// The value of the proposed replacement.
    pub candidate: Float,
    /// Whether the replacement was made.
    pub accepted: bool,
}

/// A Metropolis-style perturbation policy for the best vertex of a simplex.
///
/// While active (up to and including its horizon iteration), the policy proposes a random
/// alternative to a vertex: each coordinate moves by a uniform fraction in $`[-1/2, 1/2)`$ of the
/// mean displacement from that vertex to the others. Better candidates are always accepted and
/// worse ones with probability $`\exp(-|\Delta f| / T(k))`$.
///
/// All randomness comes from the [`UniformSource`] given at construction, so a seeded source
/// makes the whole run reproducible.
pub struct SimulatedAnnealing {
    horizon: usize,
    schedule: Box<dyn TemperatureSchedule>,
    rng: Box<dyn UniformSource>,
    accepted: usize,
    rejected: usize,
}

impl Debug for SimulatedAnnealing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAnnealing")
            .field("horizon", &self.horizon)
            .field("accepted", &self.accepted)
            .field("rejected", &self.rejected)
            .finish_non_exhaustive()
    }
}

impl SimulatedAnnealing {
    /// Create a policy which is active for iterations `0..=horizon`.
    pub fn new<S, R>(horizon: usize, schedule: S, rng: R) -> Self
    where
        S: TemperatureSchedule + 'static,
        R: UniformSource + 'static,
    {
        Self {
            horizon,
            schedule: Box::new(schedule),
            rng: Box::new(rng),
            accepted: 0,
            rejected: 0,
        }
    }
    /// Create a policy drawing from a [`fastrand::Rng`] seeded with `seed`.
    pub fn with_seed<S>(horizon: usize, schedule: S, seed: u64) -> Self
    where
        S: TemperatureSchedule + 'static,
    {
        Self::new(horizon, schedule, fastrand::Rng::with_seed(seed))
    }
    /// The last iteration at which the policy is applied.
    pub const fn horizon(&self) -> usize {
        self.horizon
    }
    /// Returns `true` while `iteration <= horizon`.
    pub const fn is_active(&self, iteration: usize) -> bool {
        iteration <= self.horizon
    }
    /// The temperature at the given iteration.
    pub fn temperature(&self, iteration: usize) -> Float {
        self.schedule.temperature(iteration)
    }
    /// Build and evaluate a random alternative to the vertex at `index`.
    ///
    /// One uniform draw is consumed per coordinate, in coordinate order.
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] if `index` is out of range, or an error
    /// from evaluating the candidate.
    pub fn propose<P, U, E>(
        &mut self,
        simplex: &Simplex,
        index: usize,
        objective: &mut CountingObjective<'_, P, U, E>,
    ) -> SimplexResult<Point, E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        let Some(replaced) = simplex.point(index) else {
            return Err(SimplexError::invalid(format!(
                "vertex index {} is out of range for a simplex with {} vertices",
                index,
                simplex.size()
            )));
        };
        let others = (simplex.size() - 1) as Float;
        let mean = simplex
            .points()
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .fold(DVector::zeros(simplex.dimension()), |acc, (_, p)| {
                acc + (&p.x - &replaced.x)
            })
            / others;
        let x = DVector::from_fn(simplex.dimension(), |k, _| {
            replaced.x[k] + (self.rng.next_uniform() - 0.5) * mean[k]
        });
        let mut candidate = Point::from(x);
        candidate.evaluate(objective)?;
        Ok(candidate)
    }
    /// Decide whether a candidate with value `candidate` should replace a vertex with value
    /// `current`.
    ///
    /// An improvement is accepted without consuming a draw. Otherwise one uniform draw $`u`$ is
    /// taken and the candidate is accepted iff $`u < \exp(-|\Delta f| / T)`$. A zero, negative,
    /// or `NaN` temperature rejects every non-improving candidate, and an inactive policy
    /// rejects everything.
    pub fn accept(
        &mut self,
        current: Float,
        candidate: Float,
        goal: GoalType,
        iteration: usize,
    ) -> bool {
        if !self.is_active(iteration) {
            return false;
        }
        let accepted = if goal.is_better_value(candidate, current) {
            true
        } else {
            let temperature = self.temperature(iteration);
            if temperature > 0.0 {
                let probability = Float::exp(-(candidate - current).abs() / temperature);
                self.rng.next_uniform() < probability
            } else {
                false
            }
        };
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
        accepted
    }
    /// The number of candidates accepted since the start of the current run.
    pub const fn accepted(&self) -> usize {
        self.accepted
    }
    /// The number of candidates rejected since the start of the current run.
    pub const fn rejected(&self) -> usize {
        self.rejected
    }
    pub(crate) fn reset_counters(&mut self) {
        self.accepted = 0;
        self.rejected = 0;
    }
}
