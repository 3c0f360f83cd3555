use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{core::GoalType, Float};

/// A struct that holds the results of a converged simplex search.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OptimizationSummary {
    /// The direction of the optimization.
    pub goal: GoalType,
    /// A message describing how the search ended.
    pub message: String,
    /// The initial parameters of the search.
    pub x0: Vec<Float>,
    /// The best parameters found.
    pub x: Vec<Float>,
    /// The value of the objective at [`OptimizationSummary::x`].
    pub fx: Float,
    /// The number of completed iterations.
    pub iterations: usize,
    /// The number of objective evaluations.
    pub cost_evals: usize,
    /// The number of annealing candidates accepted into the simplex.
    pub annealing_accepted: usize,
    /// The number of annealing candidates rejected.
    pub annealing_rejected: usize,
    /// Flag that says whether or not the search converged.
    pub converged: bool,
}

impl Display for OptimizationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let goal = match self.goal {
            GoalType::Minimize => "MINIMIZE",
            GoalType::Maximize => "MAXIMIZE",
        };
        writeln!(f, "GOAL:       {}", goal)?;
        writeln!(f, "MSG:        {}", self.message)?;
        writeln!(f, "X0:         {:?}", self.x0)?;
        writeln!(f, "X:          {:?}", self.x)?;
        writeln!(f, "F(X):       {}", self.fx)?;
        writeln!(f, "ITERATIONS: {}", self.iterations)?;
        writeln!(f, "N_F_EVALS:  {}", self.cost_evals)?;
        writeln!(
            f,
            "ANNEALING:  {} accepted / {} rejected",
            self.annealing_accepted, self.annealing_rejected
        )?;
        write!(f, "CONVERGED:  {}", self.converged)
    }
}
