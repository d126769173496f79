//! Explicit FTCS update for the 2D heat equation.

mod band_update;
mod heat;

pub use band_update::*;
pub use heat::*;
