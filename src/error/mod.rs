//! Error handling
//!
//! Defines error types and handling for the plan runner.

pub mod handlers;
pub mod types;

pub use types::*;
