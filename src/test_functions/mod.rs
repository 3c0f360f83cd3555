/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the shifted paraboloid test function.
pub mod paraboloid;
pub use paraboloid::Paraboloid;

/// Module containing a two-well test function with a shallow local minimum.
pub mod two_wells;
pub use two_wells::TwoWells;
