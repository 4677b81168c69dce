use std::path::Component;
use std::path::Path as StdPath;
use std::path::PathBuf;

use log::debug;

use crate::errors::Error;

/// Outcome of resolving a client-supplied path fragment against the served
/// root.
///
/// The distinction between the root itself and a path strictly inside it lets
/// the handler layer implement the root-echo contract (a directory GET on the
/// bare root returns the root path instead of a listing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The fragment normalized to the served root itself.
    Root(PathBuf),
    /// The fragment normalized to a path strictly inside the served root.
    Inside(PathBuf),
}

impl Resolved {
    /// The validated absolute path, whichever side of the distinction it
    /// falls on.
    pub fn path(&self) -> &StdPath {
        match self {
            Resolved::Root(p) | Resolved::Inside(p) => p,
        }
    }

    /// Whether the fragment resolved to the served root with no remainder.
    pub fn is_root(&self) -> bool {
        matches!(self, Resolved::Root(_))
    }

    /// Consumes the resolution and returns the validated absolute path.
    pub fn into_path(self) -> PathBuf {
        match self {
            Resolved::Root(p) | Resolved::Inside(p) => p,
        }
    }
}

/// The sole gate between untrusted client paths and the filesystem.
///
/// A `PathGuard` holds the served root, fixed at construction. [`resolve`]
/// is a pure computation: it normalizes a fragment lexically, renders it as a
/// host-absolute path, and tests containment on path-segment boundaries. It
/// never touches the filesystem, so validation cannot race with it.
///
/// [`resolve`]: PathGuard::resolve
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Creates a guard for the given root directory.
    pub fn new<P: AsRef<StdPath>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The served root this guard confines paths to.
    pub fn root(&self) -> &StdPath {
        &self.root
    }

    /// Resolves a client-supplied fragment into a validated absolute path.
    ///
    /// The fragment is the portion of a request URI after the resource
    /// prefix, so `srv/data/notes.txt` addresses `/srv/data/notes.txt` on
    /// Unix and `c/Users/x` addresses `c:\Users\x` on Windows.
    ///
    /// Returns `Error::OutOfBounds` when the normalized path is not contained
    /// in the root. Callers must refuse the request before performing any
    /// filesystem operation, reads included.
    pub fn resolve(&self, fragment: &str) -> Result<Resolved, Error> {
        let absolute = to_host_absolute(&normalize(fragment));
        if absolute == self.root {
            return Ok(Resolved::Root(absolute));
        }
        if !absolute.starts_with(&self.root) {
            debug!(
                "refusing path outside {}: {}",
                self.root.display(),
                absolute.display()
            );
            return Err(Error::OutOfBounds {
                what: absolute.display().to_string(),
            });
        }
        Ok(Resolved::Inside(absolute))
    }
}

/// Lexically normalizes a fragment into plain segments: `.` is dropped,
/// `..` pops, root and prefix components are stripped so the fragment is
/// always interpreted as relative. A `..` at the start clamps at the host
/// root, where the containment test will reject it.
fn normalize(fragment: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for component in StdPath::new(fragment).components() {
        match component {
            Component::Normal(c) => segments.push(c.to_string_lossy().into_owned()),
            Component::ParentDir => {
                segments.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    segments
}

/// Renders normalized segments as a host-absolute path. The first segment is
/// a drive letter on Windows; elsewhere a single leading separator is
/// prepended.
#[cfg(windows)]
fn to_host_absolute(segments: &[String]) -> PathBuf {
    let mut iter = segments.iter();
    let mut path = match iter.next() {
        Some(drive) => PathBuf::from(format!("{drive}:\\")),
        None => return PathBuf::new(),
    };
    for segment in iter {
        path.push(segment);
    }
    path
}

#[cfg(not(windows))]
fn to_host_absolute(segments: &[String]) -> PathBuf {
    let mut path = PathBuf::from("/");
    for segment in segments {
        path.push(segment);
    }
    path
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    fn guard() -> PathGuard {
        PathGuard::new("/srv/data")
    }

    #[test]
    fn accepts_path_inside_root() {
        let resolved = guard().resolve("srv/data/notes.txt").unwrap();
        assert_eq!(resolved.path(), StdPath::new("/srv/data/notes.txt"));
        assert!(!resolved.is_root());
    }

    #[test]
    fn rejects_parent_escape() {
        let err = guard().resolve("srv/data/../../etc/passwd").unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn rejects_leading_parent_segments() {
        assert!(guard().resolve("../../etc/passwd").is_err());
    }

    #[test]
    fn parent_segments_inside_root_resolve() {
        let resolved = guard().resolve("srv/data/a/../b").unwrap();
        assert_eq!(resolved.path(), StdPath::new("/srv/data/b"));
    }

    #[test]
    fn rejects_sibling_with_shared_prefix() {
        // Containment is segment-aligned, not a string prefix test.
        assert!(guard().resolve("srv/data-other/x").is_err());
        assert!(guard().resolve("srv/data-other").is_err());
    }

    #[test]
    fn root_itself_is_recognized() {
        let resolved = guard().resolve("srv/data").unwrap();
        assert!(resolved.is_root());
        assert_eq!(resolved.path(), StdPath::new("/srv/data"));
    }

    #[test]
    fn root_via_dot_segments_is_recognized() {
        assert!(guard().resolve("srv/data/sub/..").unwrap().is_root());
        assert!(guard().resolve("srv/./data/.").unwrap().is_root());
    }

    #[test]
    fn curdir_and_duplicate_separators_collapse() {
        let resolved = guard().resolve("srv//data/./a//b").unwrap();
        assert_eq!(resolved.path(), StdPath::new("/srv/data/a/b"));
    }

    #[test]
    fn rejects_unrelated_absolute_target() {
        assert!(guard().resolve("etc/passwd").is_err());
        assert!(guard().resolve("").is_err());
    }

    #[test]
    fn resolution_is_idempotent() {
        let g = guard();
        let first = g.resolve("srv/data/x/../y").unwrap();
        let second = g.resolve("srv/data/x/../y").unwrap();
        assert_eq!(first, second);
    }
}
