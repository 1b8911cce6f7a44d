//! Step result types
//!
//! Defines the per-step outcome record returned to callers.

use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// Outcome of one executed or rejected step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// 0-based position of the step in the submitted plan
    pub index: usize,
    pub ok: bool,
    pub message: String,
}

impl StepResult {
    pub fn success(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            ok: false,
            message: message.into(),
        }
    }

    /// Build a result from a handler outcome
    pub fn from_outcome(index: usize, outcome: Result<String, StepError>) -> Self {
        match outcome {
            Ok(message) => Self::success(index, message),
            Err(e) => Self::failure(index, e.to_string()),
        }
    }
}
