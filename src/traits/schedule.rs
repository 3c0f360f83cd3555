use crate::Float;

/// A temperature schedule for simulated annealing, mapping an iteration number to a temperature.
pub trait TemperatureSchedule {
    /// The temperature at the given iteration.
    fn temperature(&self, iteration: usize) -> Float;
}

impl<F> TemperatureSchedule for F
where
    F: Fn(usize) -> Float,
{
    fn temperature(&self, iteration: usize) -> Float {
        self(iteration)
    }
}
