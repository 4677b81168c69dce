use std::fs::create_dir_all;
use std::path::Path as StdPath;
use std::path::PathBuf;

use tempdir::TempDir;

use crate::CloudFs;
use crate::errors::Error;

// Relative paths to create in the temporary served root. The layout covers
// the filtering and recursion scenarios the listing tests exercise.
pub(crate) static TEMP_FILES: &[(&str, &str, bool)] = &[
    ("a.txt", "alpha", false),
    ("b.jpg", "binary-ish", false),
    ("noext", "", false),
    ("sub", "", true),
    ("sub/c.txt", "gamma", false),
    ("sub/nested", "", true),
    ("sub/nested/d.txt", "delta", false),
    ("empty", "", true),
];

/// A temporary served root pre-populated with a small directory tree, for
/// exercising listings and file operations against a real filesystem.
#[derive(Debug)]
pub struct TestRoot {
    /// The temporary directory acting as the served root.
    pub root: TempDir,
}

impl TestRoot {
    /// Creates the fixture tree in a fresh temporary directory.
    pub fn new() -> Result<Self, Error> {
        let root = TempDir::new("localcloud").map_err(|e| Error::Io {
            what: "temporary directory".into(),
            how: e.to_string(),
        })?;
        let ret = Self { root };
        for (relative_path, contents, is_dir) in TEMP_FILES {
            if *is_dir {
                create_dir_all(ret.root.path().join(relative_path)).map_err(|e| Error::Io {
                    what: relative_path.to_string(),
                    how: e.to_string(),
                })?;
            } else {
                ret.create_file(relative_path, contents)?;
            }
        }
        Ok(ret)
    }

    /// The absolute path of the served root.
    pub fn path(&self) -> &StdPath {
        self.root.path()
    }

    /// A `CloudFs` serving this root.
    pub fn cloud(&self) -> CloudFs {
        CloudFs::new(self.path())
    }

    /// The client fragment addressing `relative` under this root, i.e. the
    /// absolute path with its leading separator stripped, the way the URI
    /// remainder arrives at the resource boundary.
    pub fn fragment(&self, relative: &str) -> String {
        let full: PathBuf = self.root.path().join(relative);
        full.display()
            .to_string()
            .trim_start_matches('/')
            .to_string()
    }

    /// Creates (or replaces) a file under the root, making parents as
    /// needed.
    pub fn create_file(&self, relative: &str, contents: &str) -> Result<(), Error> {
        let full_path = self.root.path().join(relative);
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent).map_err(|e| Error::Io {
                what: parent.display().to_string(),
                how: e.to_string(),
            })?;
        }
        std::fs::write(&full_path, contents).map_err(|e| Error::from_io(&full_path, e))
    }
}
