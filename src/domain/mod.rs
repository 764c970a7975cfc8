//! Core domain types

pub mod constant;
pub mod error;
pub mod task;
pub mod workflow;
