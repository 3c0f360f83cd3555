use std::convert::Infallible;

use crate::{DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `args: &U` field which can be used to pass external
/// arguments to the function during the optimization. The function must not rely on being called
/// a particular number of times or in a particular order: the optimizer is free to evaluate the
/// same coordinates more than once.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>, args: &U) -> Result<Float, E>;
}

impl<U, E, F> CostFunction<U, E> for F
where
    F: Fn(&DVector<Float>, &U) -> Result<Float, E>,
{
    fn evaluate(&self, x: &DVector<Float>, args: &U) -> Result<Float, E> {
        self(x, args)
    }
}
