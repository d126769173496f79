pub use nalgebra::{matrix, vector};

mod grid_box;
pub mod indexing;
pub use grid_box::*;

/// World coordinate of a grid cell, `[row, column]`.
/// Signed so that ghost rows above the global grid have a coordinate.
pub type Coord = nalgebra::SVector<i32, 2>;

/// Inclusive `[min, max]` per axis, row axis first.
pub type Bounds = nalgebra::SMatrix<i32, 2, 2>;
