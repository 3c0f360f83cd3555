/// Module containing the [`ConvergenceChecker`] trait.
pub mod convergence;
/// Module containing the [`CostFunction`] trait.
pub mod cost_function;
/// Module containing the [`Observer`] trait.
pub mod observer;
/// Module containing the [`UniformSource`] trait.
pub mod random;
/// Module containing the [`TemperatureSchedule`] trait.
pub mod schedule;

pub use convergence::{Both, ConvergenceChecker, Either};
pub use cost_function::CostFunction;
pub use observer::Observer;
pub use random::UniformSource;
pub use schedule::TemperatureSchedule;
