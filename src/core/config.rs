use crate::{
    algorithms::{SimplexConfig, SimulatedAnnealing},
    core::{Bound, GoalType},
    error::{SimplexError, SimplexResult},
    DVector, Float,
};

/// One item of the heterogeneous configuration bundle accepted by
/// [`SimplexOptimizer::optimize`](crate::algorithms::SimplexOptimizer::optimize).
///
/// Items are applied in order and each one overwrites only the setting it names, so a second call
/// to `optimize` can pass just the items that changed and reuse the rest.
#[derive(Debug)]
pub enum OptimizationData {
    /// The starting point of the search (required).
    InitialGuess(Vec<Float>),
    /// Whether to minimize or maximize (default: [`GoalType::Minimize`]).
    Goal(GoalType),
    /// Parameter bounds. Anything other than [`Bound::NoBound`] is rejected.
    Bounds(Vec<Bound>),
    /// The initial simplex layout and update step (required).
    Simplex(SimplexConfig),
    /// An annealing policy (default: none).
    Annealing(SimulatedAnnealing),
    /// Remove a previously applied annealing policy.
    DisableAnnealing,
    /// The maximum number of objective evaluations (default: unlimited).
    MaxEvaluations(usize),
    /// The maximum number of iterations (default: unlimited).
    MaxIterations(usize),
}

impl From<GoalType> for OptimizationData {
    fn from(value: GoalType) -> Self {
        Self::Goal(value)
    }
}
impl From<SimplexConfig> for OptimizationData {
    fn from(value: SimplexConfig) -> Self {
        Self::Simplex(value)
    }
}
impl From<SimulatedAnnealing> for OptimizationData {
    fn from(value: SimulatedAnnealing) -> Self {
        Self::Annealing(value)
    }
}
impl From<Vec<Bound>> for OptimizationData {
    fn from(value: Vec<Bound>) -> Self {
        Self::Bounds(value)
    }
}

/// The resolved settings of a [`SimplexOptimizer`](crate::algorithms::SimplexOptimizer), built up
/// from [`OptimizationData`] items and kept between runs.
#[derive(Debug)]
pub struct SimplexOptimizerConfig {
    /// The starting point of the search.
    pub x0: Option<DVector<Float>>,
    /// The direction of the search.
    pub goal: GoalType,
    /// Parameter bounds (only accepted if none of them constrain anything).
    pub bounds: Vec<Bound>,
    /// The simplex layout and update step.
    pub simplex: Option<SimplexConfig>,
    /// The annealing policy, if any.
    pub annealing: Option<SimulatedAnnealing>,
    /// The maximum number of objective evaluations.
    pub max_evaluations: usize,
    /// The maximum number of iterations.
    pub max_iterations: usize,
}

impl Default for SimplexOptimizerConfig {
    fn default() -> Self {
        Self {
            x0: None,
            goal: GoalType::default(),
            bounds: Vec::default(),
            simplex: None,
            annealing: None,
            max_evaluations: usize::MAX,
            max_iterations: usize::MAX,
        }
    }
}

impl SimplexOptimizerConfig {
    /// Overwrite the setting named by `data`.
    pub fn apply(&mut self, data: OptimizationData) -> &mut Self {
        match data {
            OptimizationData::InitialGuess(x0) => self.x0 = Some(DVector::from_vec(x0)),
            OptimizationData::Goal(goal) => self.goal = goal,
            OptimizationData::Bounds(bounds) => self.bounds = bounds,
            OptimizationData::Simplex(simplex) => self.simplex = Some(simplex),
            OptimizationData::Annealing(annealing) => self.annealing = Some(annealing),
            OptimizationData::DisableAnnealing => self.annealing = None,
            OptimizationData::MaxEvaluations(max) => self.max_evaluations = max,
            OptimizationData::MaxIterations(max) => self.max_iterations = max,
        }
        self
    }
    /// Check that the settings describe a runnable search.
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] if the simplex or the starting point is
    /// missing, and [`SimplexError::UnsupportedConstraint`] if any bound constrains a parameter.
    pub fn validate(&self) -> SimplexResult<()> {
        if self.simplex.is_none() {
            return Err(SimplexError::invalid("no simplex was configured"));
        }
        if let Some((i, bound)) = self
            .bounds
            .iter()
            .enumerate()
            .find(|(_, bound)| bound.is_constraining())
        {
            return Err(SimplexError::UnsupportedConstraint(format!(
                "parameter #{} is bounded by {}, but the simplex search is unconstrained",
                i, bound
            )));
        }
        if self.x0.is_none() {
            return Err(SimplexError::invalid("no initial guess was configured"));
        }
        Ok(())
    }
}
