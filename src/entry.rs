use std::fs::Metadata;
use std::time::SystemTime;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::utils::to_datetime;

/// Kind of filesystem node surfaced to a client.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Enum))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Metadata of one filesystem node: size, timestamps, kind and writability.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Object))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct EntryStat {
    /// Size in bytes. For directories this is the OS-reported entry size,
    /// not the recursive content size.
    pub size: u64,
    /// Creation time when the OS reports one, otherwise the modification
    /// time.
    pub created: DateTime<Utc>,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Whether this node is a directory.
    pub is_directory: bool,
    /// Whether the read-only permission bit is clear.
    pub writable: bool,
}

impl EntryStat {
    /// Extracts an `EntryStat` from OS metadata. Creation time falls back to
    /// the modification time on platforms that do not report it.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);
        EntryStat {
            size: metadata.len(),
            created: to_datetime(created),
            modified: to_datetime(modified),
            is_directory: metadata.is_dir(),
            writable: !metadata.permissions().readonly(),
        }
    }
}

/// One filesystem node in a listing.
///
/// Entries are built fresh from live OS metadata on every listing call and
/// never cached or mutated afterwards; a listing reflects a single
/// read-through of the tree at call time.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Object))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct Entry {
    /// Whether this node is a file or a directory.
    pub kind: EntryKind,
    /// Base name of the node, without separators.
    pub name: String,
    /// Path of the node rooted at the served root, forward-slash separated
    /// regardless of host OS convention.
    pub uri: String,
    /// Metadata captured when the entry was read.
    pub stats: EntryStat,
    /// Child entries. Non-empty only for directories listed recursively;
    /// a file never has children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Entry>,
}

impl Entry {
    /// Builds an entry with no children from a name, its client URI and OS
    /// metadata.
    pub fn from_metadata(name: String, uri: String, metadata: &Metadata) -> Self {
        let stats = EntryStat::from_metadata(metadata);
        let kind = if stats.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Entry {
            kind,
            name,
            uri,
            stats,
            children: Vec::new(),
        }
    }
}
