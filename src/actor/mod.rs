//! Actor-driven simulation clock
//!
//! Ractor actors that stand in for the external turn arbiter when running
//! simulations in-process.

pub mod driver;
pub mod message;

pub use driver::*;
pub use message::*;
