/// [`Bound`] type for describing limits on a parameter.
pub mod bound;
/// [`SimplexOptimizerConfig`] and the [`OptimizationData`] items which build it.
pub mod config;
/// [`SimpleValueChecker`] and [`SimplePointChecker`] convergence tests.
pub mod convergence;
/// [`GoalType`] for choosing between minimization and maximization.
pub mod goal;
/// [`CountingObjective`] for counting and limiting objective evaluations.
pub mod objective;
/// Basic implementations of the [`Observer`](crate::traits::Observer) trait.
pub mod observers;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`SimplexStatus`] type for the state of a running search.
pub mod status;
/// [`OptimizationSummary`] type for the result of a search.
pub mod summary;

pub use bound::Bound;
pub use config::{OptimizationData, SimplexOptimizerConfig};
pub use convergence::{SimplePointChecker, SimpleValueChecker};
pub use goal::GoalType;
pub use objective::CountingObjective;
pub use observers::HistoryObserver;
pub use point::Point;
pub use status::SimplexStatus;
pub use summary::OptimizationSummary;
