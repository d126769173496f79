mod dirichlet;

pub use dirichlet::*;

use crate::util::*;

/// Boundary condition lookup by world coordinate.
/// Returns `Some(value)` when the boundary decides the cell's value.
pub trait BCCheck: Sync {
    fn check(&self, world_coord: &Coord) -> Option<f64>;
}
