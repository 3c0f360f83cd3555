use crate::core::Point;

/// A test which decides whether a single vertex has stopped moving between two consecutive
/// iterations.
///
/// The optimizer calls [`ConvergenceChecker::converged`] once for every vertex of the simplex
/// (pairing the vertex before and after an iteration, by position) and stops only when all of
/// them pass.
pub trait ConvergenceChecker {
    /// Returns `true` if the pair of points is considered converged at the given iteration.
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool;

    /// Combine two checkers so that a pair converges only when both agree.
    fn and<C: ConvergenceChecker>(self, other: C) -> Both<Self, C>
    where
        Self: Sized,
    {
        Both(self, other)
    }

    /// Combine two checkers so that a pair converges as soon as either agrees.
    fn or<C: ConvergenceChecker>(self, other: C) -> Either<Self, C>
    where
        Self: Sized,
    {
        Either(self, other)
    }
}

/// A [`ConvergenceChecker`] which requires both of its inner checkers to agree
/// (see [`ConvergenceChecker::and`]).
#[derive(Debug, Clone, Copy)]
pub struct Both<A, B>(pub A, pub B);

impl<A: ConvergenceChecker, B: ConvergenceChecker> ConvergenceChecker for Both<A, B> {
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool {
        self.0.converged(iteration, previous, current)
            && self.1.converged(iteration, previous, current)
    }
}

/// A [`ConvergenceChecker`] which is satisfied by either of its inner checkers
/// (see [`ConvergenceChecker::or`]).
#[derive(Debug, Clone, Copy)]
pub struct Either<A, B>(pub A, pub B);

impl<A: ConvergenceChecker, B: ConvergenceChecker> ConvergenceChecker for Either<A, B> {
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool {
        self.0.converged(iteration, previous, current)
            || self.1.converged(iteration, previous, current)
    }
}

impl<F> ConvergenceChecker for F
where
    F: Fn(usize, &Point, &Point) -> bool,
{
    fn converged(&self, iteration: usize, previous: &Point, current: &Point) -> bool {
        self(iteration, previous, current)
    }
}
