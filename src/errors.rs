use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Represents all possible errors surfaced by the localcloud core.
///
/// Every variant is terminal for the request that produced it; nothing in
/// this crate retries. The calling layer maps variants to transport-level
/// responses (`OutOfBounds` to 403, `NotFound` to 404, and so on).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum Error {
    /// Error indicating that a resolved path escapes the served root.
    /// Raised before any filesystem I/O happens.
    #[error("Path escapes the served root: {what}")]
    OutOfBounds {
        /// The offending resolved path.
        what: String,
    },

    /// Error indicating that the target path does not exist.
    #[error("Not found: {what}")]
    NotFound {
        /// The missing path.
        what: String,
    },

    /// Error indicating that the target exists but is the wrong kind for the
    /// requested operation, such as listing a file as a directory.
    #[error("Invalid target {what}: {how}")]
    InvalidTarget {
        /// The path with the wrong kind.
        what: String,
        /// What was expected of it.
        how: String,
    },

    /// Error indicating that a create-style operation found its target
    /// already present.
    #[error("Already exists: {what}")]
    AlreadyExists {
        /// The pre-existing path.
        what: String,
    },

    /// Error indicating any other OS-level failure.
    #[error("I/O failure on {what}: {how}")]
    Io {
        /// The path or resource the operation touched.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating a failure to parse a caller-supplied value.
    #[error("Failed to parse {what}: {how}")]
    Parse {
        /// The item that failed to be parsed.
        what: String,
        /// The reason for the failure.
        how: String,
    },
}

impl Error {
    /// Classifies an `std::io::Error` for `path`, keeping the not-found and
    /// already-exists cases distinct from generic I/O failures.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let what = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { what },
            std::io::ErrorKind::AlreadyExists => Error::AlreadyExists { what },
            _ => Error::Io {
                what,
                how: err.to_string(),
            },
        }
    }
}
