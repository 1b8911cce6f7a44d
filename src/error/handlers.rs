//! Error handlers
//!
//! Provides error reporting for the command-line shell.

use crate::error::types::AppError;
use log::error;

/// Report an application error
pub fn handle_error(err: &AppError) {
    match err {
        // Failed steps were already printed with their results
        AppError::StepsFailed(_) => {}
        _ => error!("{}", err),
    }
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::StepsFailed(_) => 1,
        AppError::Plan(_) => 2,
        AppError::Json(_) => 2,
        AppError::Config(_) => 3,
        AppError::IoError(_) => 4,
    }
}
