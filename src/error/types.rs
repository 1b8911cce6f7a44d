//! Error types
//!
//! Defines the error types for each layer of the plan runner.

use std::fmt;
use std::io;

/// Plan-level errors raised before any step runs
#[derive(Debug)]
pub enum PlanError {
    /// The plan payload is not a sequence of steps
    InvalidPlan(String),
    /// The request envelope could not be decoded
    InvalidRequest(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidPlan(found) => write!(f, "plan must be an array, got {}", found),
            PlanError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for PlanError {}

/// Storage layer errors
#[derive(Debug)]
pub enum StorageError {
    /// Path does not exist
    NotFound(String),
    /// Destination exists and overwriting was not requested
    DestinationExists(String),
    /// A file or directory inside a folder copy failed
    FolderCopy {
        from: String,
        to: String,
        source: Box<StorageError>,
    },
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(_) => write!(f, "file not found"),
            StorageError::DestinationExists(_) => write!(f, "destination already exists"),
            StorageError::FolderCopy { from, to, source } => {
                write!(f, "folder copy failed ({} -> {}): {}", from, to, source)
            }
            StorageError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::FolderCopy { source, .. } => Some(source.as_ref()),
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Per-step errors. Every variant ends up as the message of a failed step result.
#[derive(Debug)]
pub enum StepError {
    /// Not an object, or `kind` missing/empty/ill-typed fields
    Malformed(Option<String>),
    UnknownKind(String),
    EmptyPath(&'static str),
    EmptyPathPair(&'static str),
    InvalidPath(&'static str),
    /// Filesystem failure while running `op` against `target`
    Operation {
        op: &'static str,
        target: String,
        source: StorageError,
    },
    /// A fault that escaped the handler
    Unexpected(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Malformed(None) => write!(f, "invalid step format"),
            StepError::Malformed(Some(detail)) => write!(f, "invalid step format: {}", detail),
            StepError::UnknownKind(kind) => write!(f, "unknown step kind: {}", kind),
            StepError::EmptyPath(op) => write!(f, "{}: path is empty", op),
            StepError::EmptyPathPair(op) => write!(f, "{}: from/to path is empty", op),
            StepError::InvalidPath(op) => write!(f, "{}: invalid path", op),
            StepError::Operation { op, target, source } => {
                write!(f, "{} ERR: {} : {}", op, target, source)
            }
            StepError::Unexpected(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::Operation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors of the command-line shell around the core
#[derive(Debug)]
pub enum AppError {
    Plan(PlanError),
    Config(config::ConfigError),
    Json(serde_json::Error),
    IoError(io::Error),
    /// One or more steps reported failure
    StepsFailed(usize),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Plan(e) => write!(f, "Plan error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Json(e) => write!(f, "JSON error: {}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
            AppError::StepsFailed(n) => write!(f, "{} step(s) failed", n),
        }
    }
}

impl std::error::Error for AppError {}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        AppError::Plan(error)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Json(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_copy_error_names_the_failing_pair() {
        let err = StorageError::FolderCopy {
            from: "/src/a".into(),
            to: "/dst/a".into(),
            source: Box::new(StorageError::DestinationExists("/dst/a/f".into())),
        };
        assert_eq!(
            err.to_string(),
            "folder copy failed (/src/a -> /dst/a): destination already exists"
        );
    }

    #[test]
    fn operation_error_carries_op_and_target() {
        let err = StepError::Operation {
            op: "delete",
            target: "/nope".into(),
            source: StorageError::NotFound("/nope".into()),
        };
        assert_eq!(err.to_string(), "delete ERR: /nope : file not found");
    }
}
