use std::marker::PhantomData;

use crate::{
    error::{Budget, SimplexError, SimplexResult},
    traits::CostFunction,
    DVector, Float,
};

/// A [`CostFunction`] bound to its user data together with an evaluation counter.
///
/// Every evaluation performed during an optimization goes through one of these, so the count it
/// reports is exact. The budget is checked before the cost function is called: once
/// `max_evaluations` calls have been made, the next request fails with
/// [`SimplexError::BudgetExhausted`] and the function is never invoked.
pub struct CountingObjective<'a, P: ?Sized, U, E> {
    problem: &'a P,
    args: &'a U,
    evaluations: usize,
    max_evaluations: usize,
    _error: PhantomData<fn() -> E>,
}

impl<'a, P, U, E> CountingObjective<'a, P, U, E>
where
    P: CostFunction<U, E> + ?Sized,
{
    /// Wrap a cost function and its arguments with a budget of `max_evaluations` calls.
    pub const fn new(problem: &'a P, args: &'a U, max_evaluations: usize) -> Self {
        Self {
            problem,
            args,
            evaluations: 0,
            max_evaluations,
            _error: PhantomData,
        }
    }
    /// Evaluate the wrapped function at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::BudgetExhausted`] without calling the function if the budget is
    /// spent, or [`SimplexError::Objective`] if the function fails.
    pub fn evaluate(&mut self, x: &DVector<Float>) -> SimplexResult<Float, E> {
        if self.evaluations >= self.max_evaluations {
            return Err(SimplexError::BudgetExhausted {
                budget: Budget::Evaluations,
                limit: self.max_evaluations,
            });
        }
        self.evaluations += 1;
        self.problem
            .evaluate(x, self.args)
            .map_err(SimplexError::Objective)
    }
    /// The number of calls made so far.
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }
    /// The configured budget.
    pub const fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }
}
