//! `amoeba` is a derivative-free minimizer (and maximizer) built around the simplex direct search
//! of Nelder and Mead, with an optional simulated-annealing perturbation step that lets the search
//! climb out of shallow local optima. The user implements the [`CostFunction`](traits::CostFunction)
//! trait on some struct which takes a vector of parameters and returns a single-valued
//! [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$); the [`SimplexOptimizer`](algorithms::SimplexOptimizer)
//! does the rest.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Simulated Annealing](#simulated-annealing)
//! - [Errors](#errors)
//!
//! # Key Features
//! * Two interchangeable simplex update families: the standard reflect/expand/contract/shrink
//!   step and Torczon's multi-directional step.
//! * Pluggable convergence checkers which compare every vertex of the simplex before and after
//!   each iteration.
//! * An optional Metropolis-style annealing policy with configurable cooling schedules and a
//!   user-supplied random source.
//! * Telemetry through [`Observer`](traits::Observer)s and [`tracing`] events. The library never
//!   prints.
//!
//! # Quick Start
//!
//! Consider the following shifted paraboloid:
//!
//! ```rust
//! use std::convert::Infallible;
//! use amoeba::prelude::*;
//!
//! pub struct Bowl;
//! impl CostFunction for Bowl {
//!     fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
//!         Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2))
//!     }
//! }
//! ```
//! To minimize it with the standard Nelder-Mead step:
//! ```rust
//! use amoeba::prelude::*;
//! # use std::convert::Infallible;
//! # pub struct Bowl;
//! # impl CostFunction for Bowl {
//! #     fn evaluate(&self, x: &DVector<Float>, _args: &()) -> Result<Float, Infallible> {
//! #         Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2))
//! #     }
//! # }
//! fn main() -> Result<(), SimplexError> {
//!     let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10));
//!     let summary = optimizer.optimize(
//!         &Bowl,
//!         &(),
//!         [
//!             OptimizationData::InitialGuess(vec![0.0, 0.0]),
//!             SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.0)).into(),
//!             GoalType::Minimize.into(),
//!         ],
//!     )?;
//!     assert!(summary.converged);
//!     assert!((summary.x[0] - 1.0).abs() < 1e-4);
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! # Simulated Annealing
//!
//! When a [`SimulatedAnnealing`](algorithms::SimulatedAnnealing) policy is supplied, every
//! iteration within its horizon perturbs the best vertex by a random fraction of the mean
//! displacement towards the other vertices. Improvements are always accepted; a worse candidate
//! is accepted with probability
//! ```math
//! p = \exp\left(-\frac{|f(x_c) - f(x_0)|}{T(k)}\right)
//! ```
//! where $`T(k)`$ is the temperature at iteration $`k`$. The returned point is always the best
//! point ever evaluated, even if annealing has since moved the simplex away from it.
//!
//! # Errors
//!
//! Every failure is reported through [`SimplexError`](error::SimplexError): malformed
//! configuration and unsupported bounds are detected before the first evaluation, budget
//! exhaustion aborts the run without a partial result, and errors raised by the cost function are
//! passed through untouched.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the simplex geometry, the annealing policy, and the optimizer driver
pub mod algorithms;
/// Module containing the core data types used by the optimizer
pub mod core;
/// Module containing the error type shared by every fallible operation
pub mod error;
/// Module containing standard functions for testing algorithms
pub mod test_functions;
/// Module containing the traits which define the seams of the optimizer
pub mod traits;

pub use nalgebra::{DMatrix, DVector};

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(feature = "f32")]
pub type Float = f32;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::{
            CoolingSchedule, MultiDirectionalStep, NelderMeadStep, SimplexConfig, SimplexLayout,
            SimplexOptimizer, SimulatedAnnealing,
        },
        core::{
            Bound, GoalType, HistoryObserver, OptimizationData, OptimizationSummary, Point,
            SimplePointChecker, SimpleValueChecker,
        },
        error::{SimplexError, SimplexResult},
        traits::{ConvergenceChecker, CostFunction, Observer, TemperatureSchedule, UniformSource},
        DVector, Float,
    };
}
