//! File system operations
//!
//! Async primitives shared by the step handlers, including the recursive
//! folder copy.

use std::fs::Metadata;
use std::future::Future;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::pin::Pin;

use log::debug;
use tokio::fs::{self, OpenOptions};

use crate::error::StorageError;

/// Stat a path, following symlinks
pub async fn stat(path: &Path) -> io::Result<Metadata> {
    fs::metadata(path).await
}

/// Create a directory, optionally with all missing parents
pub async fn create_directory(path: &Path, recursive: bool) -> io::Result<()> {
    if recursive {
        fs::create_dir_all(path).await
    } else {
        fs::create_dir(path).await
    }
}

/// Create the parent directory of `path` and all of its ancestors
pub async fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

/// Check whether something exists at `path`.
///
/// "Not found" is `Ok(false)`; any other failure is returned as-is.
pub async fn path_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Copy a single file.
///
/// With `overwrite` unset the destination is opened with `create_new`, so an
/// existing file makes the copy fail and is left untouched. Copying a file
/// onto itself is a no-op that reports zero bytes.
pub async fn copy_file(from: &Path, to: &Path, overwrite: bool) -> Result<u64, StorageError> {
    if overwrite {
        if is_same_file(from, to).await? {
            debug!("Skipping copy of {} onto itself", from.display());
            return Ok(0);
        }
        return Ok(fs::copy(from, to).await?);
    }

    let mut source = fs::File::open(from).await?;
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(to).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(StorageError::DestinationExists(to.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let bytes = tokio::io::copy(&mut source, &mut dest).await?;
    let permissions = source.metadata().await?.permissions();
    fs::set_permissions(to, permissions).await?;
    Ok(bytes)
}

/// Check whether `a` and `b` name the same file on disk.
///
/// A missing `b` is `Ok(false)`.
pub async fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let target = match fs::metadata(b).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let source = fs::metadata(a).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(source.dev() == target.dev() && source.ino() == target.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (source, target);
        Ok(fs::canonicalize(a).await? == fs::canonicalize(b).await?)
    }
}

/// Recursively copy the directory `src` into `dest`, depth-first.
///
/// `dest` is created if missing and merged into if present. The first failure
/// aborts the whole copy; nothing already copied is rolled back.
pub async fn copy_folder(src: &Path, dest: &Path, overwrite: bool) -> Result<(), StorageError> {
    copy_folder_inner(src, dest, overwrite)
        .await
        .map_err(|e| StorageError::FolderCopy {
            from: src.display().to_string(),
            to: dest.display().to_string(),
            source: Box::new(e),
        })
}

fn copy_folder_inner<'a>(
    src: &'a Path,
    dest: &'a Path,
    overwrite: bool,
) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
    Box::pin(async move {
        fs::create_dir_all(dest).await?;

        let mut entries = fs::read_dir(src).await?;
        while let Some(entry) = entries.next_entry().await? {
            let src_path = entry.path();
            let dest_path = dest.join(entry.file_name());

            if entry.file_type().await?.is_dir() {
                copy_folder(&src_path, &dest_path, overwrite).await?;
            } else {
                let bytes = copy_file(&src_path, &dest_path, overwrite).await?;
                debug!(
                    "Copied {} -> {} ({} bytes)",
                    src_path.display(),
                    dest_path.display(),
                    bytes
                );
            }
        }

        Ok::<(), StorageError>(())
    })
}

/// Remove a directory; `recursive` removes its contents too
pub async fn remove_directory(path: &Path, recursive: bool) -> io::Result<()> {
    if recursive {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_dir(path).await
    }
}

/// Remove a file
pub async fn remove_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path).await
}

/// Rename `from` to `to` in a single filesystem call
pub async fn rename(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to).await
}
