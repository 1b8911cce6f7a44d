pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod storage;
pub mod utils;

pub use plan::{Step, StepResult, execute, execute_steps, run_request_json};
