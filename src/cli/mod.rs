//! Command-line interface of the `theatre` binary

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
