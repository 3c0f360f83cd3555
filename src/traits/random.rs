use crate::Float;

/// The only source of randomness consumed by the optimizer: a stream of uniform draws in
/// $`[0, 1)`$.
///
/// Supplying a seeded source makes a whole annealing run reproducible, since every draw is taken
/// in a fixed order.
pub trait UniformSource {
    /// Draw the next uniformly distributed value in $`[0, 1)`$.
    fn next_uniform(&mut self) -> Float;
}

impl UniformSource for fastrand::Rng {
    #[cfg(not(feature = "f32"))]
    fn next_uniform(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn next_uniform(&mut self) -> Float {
        self.f32()
    }
}

impl<R: UniformSource + ?Sized> UniformSource for Box<R> {
    fn next_uniform(&mut self) -> Float {
        (**self).next_uniform()
    }
}
