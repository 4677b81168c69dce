use std::path::Path as StdPath;

use async_recursion::async_recursion;
use futures_lite::StreamExt;
use log::trace;

use crate::entry::Entry;
use crate::errors::Error;
use crate::options::ListOptions;
use crate::utils::slash_uri;

/// Recursively enumerates `path` into typed entries per `options`.
///
/// `path` must already be validated by [`PathGuard`]; no containment check
/// happens here. Each level issues its own fresh directory read and entries
/// are appended in the order that read yields them, with no imposed sort.
/// Any failure mid-descent aborts the whole listing; no partial tree is ever
/// returned.
///
/// [`PathGuard`]: crate::PathGuard
pub async fn list_tree(path: &StdPath, options: &ListOptions) -> Result<Vec<Entry>, Error> {
    let metadata = async_fs::metadata(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    if !metadata.is_dir() {
        return Err(Error::InvalidTarget {
            what: path.display().to_string(),
            how: "listing requires a directory".to_string(),
        });
    }
    list_level(path, options).await
}

#[async_recursion]
async fn list_level(dir_path: &StdPath, options: &ListOptions) -> Result<Vec<Entry>, Error> {
    trace!("listing {}", dir_path.display());
    let mut entries = async_fs::read_dir(dir_path)
        .await
        .map_err(|e| Error::from_io(dir_path, e))?;
    let dir_uri = slash_uri(dir_path);

    let mut items = Vec::new();
    while let Some(entry) = entries.next().await {
        let entry = entry.map_err(|e| Error::from_io(dir_path, e))?;
        let metadata = entry
            .metadata()
            .await
            .map_err(|e| Error::from_io(&entry.path(), e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if metadata.is_dir() {
            if !options.scope.includes_dirs() {
                continue;
            }
            let uri = format!("{}/{}", dir_uri.trim_end_matches('/'), name);
            let mut item = Entry::from_metadata(name, uri, &metadata);
            if options.recursive {
                item.children = list_level(&entry.path(), options).await?;
            }
            items.push(item);
        } else if options.scope.includes_files() && options.matches_file(&name) {
            let uri = format!("{}/{}", dir_uri.trim_end_matches('/'), name);
            items.push(Entry::from_metadata(name, uri, &metadata));
        }
    }
    Ok(items)
}
