//! Storage operations
//!
//! Handles the filesystem side of each plan step: mkdir, copy, move and delete.
//! Every handler normalizes and validates its inputs before touching the disk
//! and reports a single `StepResult`.

use std::io::ErrorKind;
use std::path::Path;

use log::{error, info};

use crate::error::{StepError, StorageError};
use crate::plan::{DeleteStep, MkdirStep, StepResult, TransferStep};
use crate::storage::filesystem;
use crate::storage::validation::{is_valid_path, sanitize_input};

/// Handles a mkdir step
pub async fn handle_mkdir(index: usize, step: MkdirStep) -> StepResult {
    StepResult::from_outcome(index, make_directory(&step).await)
}

/// Handles a copy step
pub async fn handle_copy(index: usize, step: TransferStep) -> StepResult {
    StepResult::from_outcome(index, copy_path(&step).await)
}

/// Handles a move step
pub async fn handle_move(index: usize, step: TransferStep) -> StepResult {
    StepResult::from_outcome(index, move_path(&step).await)
}

/// Handles a delete step
pub async fn handle_delete(index: usize, step: DeleteStep) -> StepResult {
    StepResult::from_outcome(index, delete_path(&step).await)
}

/// Creates a directory
pub async fn make_directory(step: &MkdirStep) -> Result<String, StepError> {
    let path = sanitize_input(&step.path);
    if path.is_empty() {
        return Err(StepError::EmptyPath("mkdir"));
    }
    if !is_valid_path(path) {
        return Err(StepError::InvalidPath("mkdir"));
    }

    match filesystem::create_directory(Path::new(path), step.recursive).await {
        Ok(()) => {
            info!("Created directory {} (recursive: {})", path, step.recursive);
            Ok(format!("mkdir OK: {}", path))
        }
        Err(e) => {
            error!("Failed to create directory {}: {}", path, e);
            Err(StepError::Operation {
                op: "mkdir",
                target: path.to_string(),
                source: e.into(),
            })
        }
    }
}

/// Copies a file or a whole folder
pub async fn copy_path(step: &TransferStep) -> Result<String, StepError> {
    let (from, to) = validate_pair("copy", step)?;

    copy_inner(from, to, step)
        .await
        .map_err(|e| {
            error!("Failed to copy {} -> {}: {}", from, to, e);
            StepError::Operation {
                op: "copy",
                target: format!("{} -> {}", from, to),
                source: e,
            }
        })
}

async fn copy_inner(from: &str, to: &str, step: &TransferStep) -> Result<String, StorageError> {
    let (src, dest) = (Path::new(from), Path::new(to));
    let metadata = filesystem::stat(src).await?;

    if step.ensure_parent {
        filesystem::ensure_parent(dest).await?;
    }

    if metadata.is_dir() {
        filesystem::copy_folder(src, dest, step.overwrite).await?;
        info!("Copied folder {} -> {}", from, to);
        Ok(format!("copy OK (folder): {} -> {}", from, to))
    } else {
        let bytes = filesystem::copy_file(src, dest, step.overwrite).await?;
        info!("Copied file {} -> {} ({} bytes)", from, to, bytes);
        Ok(format!("copy OK (file): {} -> {}", from, to))
    }
}

/// Moves a file or folder with a single rename
pub async fn move_path(step: &TransferStep) -> Result<String, StepError> {
    let (from, to) = validate_pair("move", step)?;

    move_inner(from, to, step).await.map_err(|e| {
        error!("Failed to move {} -> {}: {}", from, to, e);
        StepError::Operation {
            op: "move",
            target: format!("{} -> {}", from, to),
            source: e,
        }
    })
}

async fn move_inner(from: &str, to: &str, step: &TransferStep) -> Result<String, StorageError> {
    let (src, dest) = (Path::new(from), Path::new(to));
    let metadata = filesystem::stat(src).await?;

    if step.ensure_parent {
        filesystem::ensure_parent(dest).await?;
    }

    if !step.overwrite && filesystem::path_exists(dest).await? {
        return Err(StorageError::DestinationExists(to.to_string()));
    }

    filesystem::rename(src, dest).await?;

    let kind = if metadata.is_dir() { "folder" } else { "file" };
    info!("Moved {} {} -> {}", kind, from, to);
    Ok(format!("move OK ({}): {} -> {}", kind, from, to))
}

/// Deletes a file or directory.
///
/// The path is stat'ed first, so a missing path fails even with `force` set;
/// `force` only allows removing non-empty directories.
pub async fn delete_path(step: &DeleteStep) -> Result<String, StepError> {
    let path = sanitize_input(&step.path);
    if path.is_empty() {
        return Err(StepError::EmptyPath("delete"));
    }
    if !is_valid_path(path) {
        return Err(StepError::InvalidPath("delete"));
    }

    delete_inner(path, step.force).await.map_err(|e| {
        error!("Failed to delete {}: {}", path, e);
        StepError::Operation {
            op: "delete",
            target: path.to_string(),
            source: e,
        }
    })
}

async fn delete_inner(path: &str, force: bool) -> Result<String, StorageError> {
    let target = Path::new(path);
    let metadata = match filesystem::stat(target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound && !force => {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        filesystem::remove_directory(target, force).await?;
        info!("Deleted directory {} (force: {})", path, force);
        Ok(format!("delete OK (dir): {}", path))
    } else {
        filesystem::remove_file(target).await?;
        info!("Deleted file {}", path);
        Ok(format!("delete OK (file): {}", path))
    }
}

/// Trims and validates the `from`/`to` pair of a copy or move step
fn validate_pair<'a>(
    op: &'static str,
    step: &'a TransferStep,
) -> Result<(&'a str, &'a str), StepError> {
    let from = sanitize_input(&step.from);
    let to = sanitize_input(&step.to);

    if from.is_empty() || to.is_empty() {
        return Err(StepError::EmptyPathPair(op));
    }
    if !is_valid_path(from) || !is_valid_path(to) {
        return Err(StepError::InvalidPath(op));
    }

    Ok((from, to))
}
