use std::{cell::RefCell, rc::Rc, sync::Arc};

use parking_lot::{Mutex, RwLock};

use crate::{algorithms::AnnealingDecision, core::SimplexStatus};

/// A trait which receives telemetry from a [`SimplexOptimizer`](crate::algorithms::SimplexOptimizer)
/// as it runs.
///
/// Both methods default to doing nothing, so an implementor only needs to override the events it
/// cares about. Observers are attached with
/// [`SimplexOptimizer::with_observer`](crate::algorithms::SimplexOptimizer::with_observer) and
/// are usually shared with the caller through an [`Arc<RwLock<_>>`], which also implements this
/// trait.
///
/// # Usage:
///
/// ```rust
/// use amoeba::prelude::*;
/// use amoeba::core::SimplexStatus;
/// use amoeba::test_functions::Paraboloid;
/// use std::sync::Arc;
/// use parking_lot::RwLock;
///
/// #[derive(Default)]
/// struct Counter(usize);
/// impl Observer for Counter {
///     fn observe_step(&mut self, _step: usize, _status: &SimplexStatus) {
///         self.0 += 1;
///     }
/// }
///
/// let counter = Arc::new(RwLock::new(Counter::default()));
/// let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10))
///     .with_observer(counter.clone());
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
/// assert_eq!(counter.read().0, summary.iterations);
/// ```
pub trait Observer {
    /// Called once after every completed iteration with the updated status.
    fn observe_step(&mut self, _step: usize, _status: &SimplexStatus) {}
    /// Called once for every annealing decision, whether or not the candidate was accepted.
    fn observe_annealing(&mut self, _step: usize, _decision: &AnnealingDecision) {}
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn observe_step(&mut self, step: usize, status: &SimplexStatus) {
        (**self).observe_step(step, status);
    }
    fn observe_annealing(&mut self, step: usize, decision: &AnnealingDecision) {
        (**self).observe_annealing(step, decision);
    }
}

impl<O: Observer> Observer for Arc<RwLock<O>> {
    fn observe_step(&mut self, step: usize, status: &SimplexStatus) {
        self.write().observe_step(step, status);
    }
    fn observe_annealing(&mut self, step: usize, decision: &AnnealingDecision) {
        self.write().observe_annealing(step, decision);
    }
}

impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn observe_step(&mut self, step: usize, status: &SimplexStatus) {
        self.lock().observe_step(step, status);
    }
    fn observe_annealing(&mut self, step: usize, decision: &AnnealingDecision) {
        self.lock().observe_annealing(step, decision);
    }
}

impl<O: Observer> Observer for Rc<RefCell<O>> {
    fn observe_step(&mut self, step: usize, status: &SimplexStatus) {
        self.borrow_mut().observe_step(step, status);
    }
    fn observe_annealing(&mut self, step: usize, decision: &AnnealingDecision) {
        self.borrow_mut().observe_annealing(step, decision);
    }
}
