use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{DVector, Float};

/// A status message struct containing everything known about a running (or finished) simplex
/// search.
///
/// The position reported here is always the best point evaluated so far, which may differ from
/// the current best vertex of the simplex when annealing has moved the simplex uphill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplexStatus {
    /// The starting point of the search.
    pub x0: DVector<Float>,
    /// The label of the last simplex step (`"REFLECT"`, `"SHRINK"`, ...) or a final message.
    pub message: String,
    /// The best parameters found so far.
    pub x: DVector<Float>,
    /// The value of the objective at [`SimplexStatus::x`].
    pub fx: Float,
    /// The exact number of objective evaluations performed.
    pub n_f_evals: usize,
    /// The number of completed iterations.
    pub iteration: usize,
    /// Flag that says whether or not the search is in a converged state.
    pub converged: bool,
}

impl SimplexStatus {
    /// Clear everything except the starting point.
    pub fn reset(&mut self) {
        self.message = String::new();
        self.x = DVector::zeros(self.x0.len());
        self.fx = Float::default();
        self.n_f_evals = 0;
        self.iteration = 0;
        self.converged = false;
    }
    /// Updates the [`SimplexStatus::x0`] field.
    pub fn with_x0<I: IntoIterator<Item = Float>>(&mut self, x0: I) -> &mut Self {
        let x0 = x0.into_iter().collect::<Vec<Float>>();
        self.x0 = DVector::from_column_slice(&x0);
        self
    }
    /// Updates the [`SimplexStatus::message`] field.
    pub fn with_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
    /// Updates the [`SimplexStatus::x`] and [`SimplexStatus::fx`] fields.
    pub fn with_position(&mut self, pos: (DVector<Float>, Float)) {
        self.x = pos.0;
        self.fx = pos.1;
    }
    /// Sets [`SimplexStatus::converged`] to be `true`.
    pub fn set_converged(&mut self) {
        self.converged = true;
    }
}

impl Display for SimplexStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MSG:       {}", self.message)?;
        writeln!(f, "X:         {}", self.x.transpose())?;
        writeln!(f, "F(X):      {}", self.fx)?;
        writeln!(f, "N_F_EVALS: {}", self.n_f_evals)?;
        writeln!(f, "ITERATION: {}", self.iteration)?;
        write!(f, "CONVERGED: {}", self.converged)
    }
}
