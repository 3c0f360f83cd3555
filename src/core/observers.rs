use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    algorithms::AnnealingDecision, core::SimplexStatus, traits::Observer,
};

/// An [`Observer`] which keeps a copy of every status and every annealing decision it is shown.
///
/// # Usage:
///
/// ```rust
/// use amoeba::prelude::*;
/// use amoeba::test_functions::Paraboloid;
///
/// let history = HistoryObserver::build();
/// let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10))
///     .with_observer(history.clone());
/// let summary = optimizer
///     .optimize(
///         &Paraboloid::new(vec![1.0, 2.0]),
///         &(),
///         [
///             OptimizationData::InitialGuess(vec![0.0, 0.0]),
///             SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.0)).into(),
///         ],
///     )
///     .unwrap();
/// assert_eq!(history.read().steps.len(), summary.iterations);
/// ```
#[derive(Debug, Default, Clone)]
pub struct HistoryObserver {
    /// The status after each iteration, in order.
    pub steps: Vec<SimplexStatus>,
    /// Every annealing decision, in order.
    pub decisions: Vec<AnnealingDecision>,
}

impl HistoryObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.decisions.clear();
    }
}

impl Observer for HistoryObserver {
    fn observe_step(&mut self, _step: usize, status: &SimplexStatus) {
        self.steps.push(status.clone());
    }
    fn observe_annealing(&mut self, _step: usize, decision: &AnnealingDecision) {
        self.decisions.push(*decision);
    }
}
