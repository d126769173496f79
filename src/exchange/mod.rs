//! Message passing between workers.
//!
//! Workers never share field memory. Everything they learn about each
//! other travels as tagged messages through a [`Communicator`]: ghost rows
//! every step, and a handful of collectives outside the time loop.

mod channel;
mod communicator;
mod exchanger;
mod message;
pub mod probe;

pub use channel::*;
pub use communicator::*;
pub use exchanger::*;
pub use message::*;
