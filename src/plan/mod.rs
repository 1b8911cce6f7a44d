//! Plan execution
//!
//! Step descriptors, the sequential executor, the request boundary, and
//! result rendering.

pub mod executor;
pub mod render;
pub mod request;
pub mod results;
pub mod step;

pub use executor::{execute, execute_steps};
pub use request::{PlanRequest, run_request, run_request_json};
pub use results::StepResult;
pub use step::{DeleteStep, MkdirStep, Step, TransferStep};
