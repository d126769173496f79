//! Time stepping for a group of row band workers.

mod driver;
mod parameters;
mod progress;
mod worker;

pub use driver::*;
pub use parameters::*;
pub use progress::*;
pub use worker::*;
