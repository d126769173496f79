pub mod build_info;
pub mod cli;
pub mod decomposition;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod initial_conditions;
pub mod par_slice;
pub mod snapshot;
pub mod solver;
pub mod stats;
pub mod stencil;
pub mod util;

pub use error::{HeatError, Result};
