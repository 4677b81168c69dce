use std::path::Path as StdPath;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;

use crate::entry::Entry;
use crate::entry::EntryStat;
use crate::errors::Error;
use crate::guard::PathGuard;
use crate::guard::Resolved;
use crate::list::list_tree;
use crate::options::ListOptions;
use crate::ops;
use crate::status::CloudStatus;

/// A sandboxed filesystem rooted at a fixed directory.
///
/// This is the one type a resource-handler layer needs: every operation takes
/// client-supplied path fragments and runs them through the [`PathGuard`]
/// before any I/O, sources exactly as strictly as destinations. The root is
/// fixed at construction and never mutated, so a `CloudFs` can be cloned
/// freely across concurrent request workers without synchronization.
#[derive(Debug, Clone)]
pub struct CloudFs {
    guard: PathGuard,
}

impl CloudFs {
    /// Creates a sandbox serving `root`.
    pub fn new<P: AsRef<StdPath>>(root: P) -> Self {
        CloudFs {
            guard: PathGuard::new(root),
        }
    }

    /// The served root directory.
    pub fn root(&self) -> &StdPath {
        self.guard.root()
    }

    /// Resolves and validates a fragment without touching the filesystem.
    ///
    /// Exposed so the handler layer can implement the root-echo contract:
    /// a directory GET whose fragment resolves to the bare root answers with
    /// the root path itself instead of a listing.
    pub fn resolve(&self, fragment: &str) -> Result<Resolved, Error> {
        self.guard.resolve(fragment)
    }

    fn validated(&self, fragment: &str) -> Result<PathBuf, Error> {
        Ok(self.guard.resolve(fragment)?.into_path())
    }

    /// Lists the directory at `fragment` per `options`. Listing the root
    /// itself is valid here; the root-echo bypass belongs to the caller.
    pub async fn list(&self, fragment: &str, options: &ListOptions) -> Result<Vec<Entry>, Error> {
        let path = self.validated(fragment)?;
        list_tree(&path, options).await
    }

    /// Whether anything exists at `fragment`, for existence-check requests.
    pub async fn exists(&self, fragment: &str) -> Result<bool, Error> {
        let path = self.validated(fragment)?;
        Ok(ops::exists(&path).await)
    }

    /// Stats the node at `fragment`.
    pub async fn stat(&self, fragment: &str) -> Result<EntryStat, Error> {
        let path = self.validated(fragment)?;
        ops::stat(&path).await
    }

    /// Whether the node at `fragment` was modified strictly after `since`,
    /// for conditional-GET requests.
    pub async fn modified_since(
        &self,
        fragment: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let path = self.validated(fragment)?;
        ops::modified_since(&path, since).await
    }

    /// Reads the full contents of the file at `fragment`.
    pub async fn read_file(&self, fragment: &str) -> Result<Vec<u8>, Error> {
        let path = self.validated(fragment)?;
        ops::read_file(&path).await
    }

    /// Writes `content` to the file at `fragment`. With `overwrite` false
    /// this is a create and the file must not exist; with `overwrite` true
    /// it is a save and the file must already exist.
    pub async fn write_file(
        &self,
        fragment: &str,
        content: &[u8],
        overwrite: bool,
    ) -> Result<(), Error> {
        let path = self.validated(fragment)?;
        ops::write_file(&path, content, overwrite).await
    }

    /// Deletes the file at `fragment`.
    pub async fn remove_file(&self, fragment: &str) -> Result<(), Error> {
        let path = self.validated(fragment)?;
        ops::remove_file(&path).await
    }

    /// Copies the file at `source_fragment` to `dest_fragment`.
    pub async fn copy_file(&self, source_fragment: &str, dest_fragment: &str) -> Result<(), Error> {
        let source = self.validated(source_fragment)?;
        let dest = self.validated(dest_fragment)?;
        ops::copy_file(&source, &dest).await
    }

    /// Moves the file at `source_fragment` to `dest_fragment`.
    pub async fn move_file(&self, source_fragment: &str, dest_fragment: &str) -> Result<(), Error> {
        let source = self.validated(source_fragment)?;
        let dest = self.validated(dest_fragment)?;
        ops::move_file(&source, &dest).await
    }

    /// Creates the directory at `fragment`, including missing parents.
    pub async fn create_dir(&self, fragment: &str) -> Result<(), Error> {
        let path = self.validated(fragment)?;
        ops::create_dir(&path).await
    }

    /// Deletes the directory at `fragment` and everything under it.
    pub async fn remove_dir(&self, fragment: &str) -> Result<(), Error> {
        let path = self.validated(fragment)?;
        ops::remove_dir(&path).await
    }

    /// Recursively copies the directory at `source_fragment` to
    /// `dest_fragment`, which must not exist yet.
    pub async fn copy_dir(&self, source_fragment: &str, dest_fragment: &str) -> Result<(), Error> {
        let source = self.validated(source_fragment)?;
        let dest = self.validated(dest_fragment)?;
        ops::copy_dir(&source, &dest).await
    }

    /// Moves the directory at `source_fragment` to `dest_fragment`.
    pub async fn move_dir(&self, source_fragment: &str, dest_fragment: &str) -> Result<(), Error> {
        let source = self.validated(source_fragment)?;
        let dest = self.validated(dest_fragment)?;
        ops::move_dir(&source, &dest).await
    }

    /// The status report for this instance.
    pub fn status(&self) -> CloudStatus {
        CloudStatus::current(self.root())
    }
}
