//! Filesystem primitives behind the [`CloudFs`](crate::CloudFs) facade.
//!
//! Every function here takes pre-validated absolute paths; confinement has
//! already happened in the facade. Errors are classified through
//! [`Error::from_io`] so not-found and already-exists stay distinct from
//! generic I/O failures.

use std::path::Path as StdPath;

use async_recursion::async_recursion;
use chrono::DateTime;
use chrono::Utc;
use futures_lite::StreamExt;
use log::trace;

use crate::entry::EntryStat;
use crate::errors::Error;

/// Whether anything exists at `path`. Lookup failures other than not-found
/// count as existing, so a later operation surfaces the real error.
pub(crate) async fn exists(path: &StdPath) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(true)
}

/// Stats `path` into an [`EntryStat`].
pub(crate) async fn stat(path: &StdPath) -> Result<EntryStat, Error> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    Ok(EntryStat::from_metadata(&metadata))
}

/// Whether `path` was modified strictly after `since`.
pub(crate) async fn modified_since(path: &StdPath, since: DateTime<Utc>) -> Result<bool, Error> {
    Ok(stat(path).await?.modified > since)
}

/// Reads the full contents of a file.
pub(crate) async fn read_file(path: &StdPath) -> Result<Vec<u8>, Error> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(Error::InvalidTarget {
            what: path.display().to_string(),
            how: "reading requires a file".to_string(),
        });
    }
    tokio::fs::read(path).await.map_err(|e| Error::from_io(path, e))
}

/// Writes `content` to `path`. With `overwrite` false the file must not
/// exist yet (create); with `overwrite` true it must already exist (save).
pub(crate) async fn write_file(path: &StdPath, content: &[u8], overwrite: bool) -> Result<(), Error> {
    let present = exists(path).await;
    if !overwrite && present {
        return Err(Error::AlreadyExists {
            what: path.display().to_string(),
        });
    }
    if overwrite && !present {
        return Err(Error::NotFound {
            what: path.display().to_string(),
        });
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::from_io(path, e))
}

/// Removes a single file.
pub(crate) async fn remove_file(path: &StdPath) -> Result<(), Error> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| Error::from_io(path, e))
}

/// Renames a file within the served filesystem.
pub(crate) async fn move_file(source: &StdPath, dest: &StdPath) -> Result<(), Error> {
    tokio::fs::rename(source, dest)
        .await
        .map_err(|e| Error::from_io(source, e))
}

/// Copies a file. Permissions propagate with the copy.
pub(crate) async fn copy_file(source: &StdPath, dest: &StdPath) -> Result<(), Error> {
    tokio::fs::copy(source, dest)
        .await
        .map_err(|e| Error::from_io(source, e))?;
    Ok(())
}

/// Creates a directory, including missing parents.
pub(crate) async fn create_dir(path: &StdPath) -> Result<(), Error> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::from_io(path, e))
}

/// Removes a directory and everything under it.
pub(crate) async fn remove_dir(path: &StdPath) -> Result<(), Error> {
    tokio::fs::remove_dir_all(path)
        .await
        .map_err(|e| Error::from_io(path, e))
}

/// Renames a directory within the served filesystem.
pub(crate) async fn move_dir(source: &StdPath, dest: &StdPath) -> Result<(), Error> {
    tokio::fs::rename(source, dest)
        .await
        .map_err(|e| Error::from_io(source, e))
}

/// Recursively copies a directory. The source must be a directory and the
/// destination must not exist yet.
pub(crate) async fn copy_dir(source: &StdPath, dest: &StdPath) -> Result<(), Error> {
    let metadata = tokio::fs::metadata(source)
        .await
        .map_err(|e| Error::from_io(source, e))?;
    if !metadata.is_dir() {
        return Err(Error::InvalidTarget {
            what: source.display().to_string(),
            how: "copying a tree requires a directory".to_string(),
        });
    }
    if exists(dest).await {
        return Err(Error::AlreadyExists {
            what: dest.display().to_string(),
        });
    }
    copy_dir_recursive(source, dest).await
}

#[async_recursion]
async fn copy_dir_recursive(source: &StdPath, dest: &StdPath) -> Result<(), Error> {
    trace!("copying {} -> {}", source.display(), dest.display());
    tokio::fs::create_dir_all(dest)
        .await
        .map_err(|e| Error::from_io(dest, e))?;
    let mut entries = async_fs::read_dir(source)
        .await
        .map_err(|e| Error::from_io(source, e))?;
    while let Some(entry) = entries.next().await {
        let entry = entry.map_err(|e| Error::from_io(source, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let metadata = entry
            .metadata()
            .await
            .map_err(|e| Error::from_io(&from, e))?;
        if metadata.is_dir() {
            copy_dir_recursive(&from, &to).await?;
        } else {
            copy_file(&from, &to).await?;
        }
    }
    Ok(())
}
