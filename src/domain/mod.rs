//! This module has things for managing a worker's piece of the grid,
//! which really means retrieving values based on world coordinates.
//! A worker never holds the whole grid, only its row band plus a ghost
//! row on each side.
//! We use views to represent the piece of space a buffer represents,
//! and translate from world coordinates into buffer offsets.

mod bc;
mod local_field;
mod view;

pub use bc::*;
pub use local_field::*;
pub use view::*;
