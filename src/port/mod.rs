//! Capability interfaces consumed by the synchronization core

pub mod actor;

pub use actor::Actor;
