use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    error::Error,
    fmt::{self, Display},
};

/// The kind of budget which was exhausted during an optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    /// The maximum number of cost function evaluations.
    Evaluations,
    /// The maximum number of simplex iterations.
    Iterations,
}

impl Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluations => write!(f, "evaluations"),
            Self::Iterations => write!(f, "iterations"),
        }
    }
}

/// The error type for every fallible operation in this crate.
///
/// The generic `E` is the error type of the user's [`CostFunction`](crate::traits::CostFunction),
/// which is passed through untouched in [`SimplexError::Objective`]. Operations which never call
/// the cost function return `SimplexError<Infallible>` and can be converted with
/// [`SimplexError::widen`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimplexError<E = Infallible> {
    /// The optimizer was set up in a way that can never work (missing simplex, missing start
    /// point, dimension mismatch, degenerate initial simplex, ...).
    InvalidConfiguration(String),
    /// Constraints were supplied which this optimizer cannot honor.
    UnsupportedConstraint(String),
    /// The evaluation or iteration budget ran out before convergence.
    BudgetExhausted {
        /// Which budget was exhausted.
        budget: Budget,
        /// The configured limit of that budget.
        limit: usize,
    },
    /// The cost function itself failed.
    Objective(E),
}

/// A [`Result`] alias with [`SimplexError`] as the error type.
pub type SimplexResult<T, E = Infallible> = Result<T, SimplexError<E>>;

impl<E> SimplexError<E> {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Returns `true` if this error was raised by an exhausted budget.
    pub const fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::BudgetExhausted { .. })
    }
}

impl SimplexError<Infallible> {
    /// Convert an error which cannot have come from a cost function into one which could have.
    pub fn widen<E>(self) -> SimplexError<E> {
        match self {
            Self::InvalidConfiguration(message) => SimplexError::InvalidConfiguration(message),
            Self::UnsupportedConstraint(message) => SimplexError::UnsupportedConstraint(message),
            Self::BudgetExhausted { budget, limit } => SimplexError::BudgetExhausted { budget, limit },
            Self::Objective(never) => match never {},
        }
    }
}

impl<E: Display> Display for SimplexError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(message) => write!(f, "invalid configuration: {message}"),
            Self::UnsupportedConstraint(message) => write!(f, "unsupported constraint: {message}"),
            Self::BudgetExhausted { budget, limit } => {
                write!(f, "maximal number of {budget} ({limit}) exceeded")
            }
            Self::Objective(err) => write!(f, "cost function failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for SimplexError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Objective(err) => Some(err),
            _ => None,
        }
    }
}
