/// Module containing the simulated-annealing perturbation policy.
pub mod annealing;
pub use annealing::{AnnealingDecision, CoolingSchedule, SimulatedAnnealing};

/// Module containing the driver which runs a simplex search to convergence.
pub mod optimizer;
pub use optimizer::SimplexOptimizer;

/// Module containing the simplex geometry and its two update families.
pub mod simplex;
pub use simplex::{
    MultiDirectionalStep, NelderMeadStep, Simplex, SimplexConfig, SimplexExpansionMethod,
    SimplexLayout, SimplexStep, StepKind,
};
