//! File system storage management
//!
//! Handles the step operations, the async filesystem primitives behind them,
//! and path validation.

pub mod filesystem;
pub mod operations;
pub mod validation;

pub use operations::{handle_copy, handle_delete, handle_mkdir, handle_move};
pub use validation::is_valid_path;
