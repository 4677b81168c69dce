//! Stringly-typed renditions of the data model, matching the wire contract
//! of the original cloud protocol. Everything internal stays strongly typed;
//! conversion to strings happens only here, at the serialization edge.

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::entry::Entry;
use crate::entry::EntryKind;
use crate::entry::EntryStat;
use crate::utils::epoch_millis_string;

/// One listing entry as it crosses the wire: every field a string, dates as
/// epoch milliseconds, `children` omitted when empty.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Object))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct WireEntry {
    /// `"file"` or `"directory"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base name of the node.
    pub name: String,
    /// Forward-slash path rooted at the served root.
    pub uri: String,
    /// Creation time as an epoch-millisecond string.
    pub creationdate: String,
    /// Modification time as an epoch-millisecond string.
    pub modifieddate: String,
    /// Size in bytes, as a string.
    pub size: String,
    /// `"true"` or `"false"`.
    pub writable: String,
    /// Child entries; present only for recursively listed directories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireEntry>,
}

impl From<&Entry> for WireEntry {
    fn from(entry: &Entry) -> Self {
        WireEntry {
            kind: match entry.kind {
                EntryKind::File => "file".to_string(),
                EntryKind::Directory => "directory".to_string(),
            },
            name: entry.name.clone(),
            uri: entry.uri.clone(),
            creationdate: epoch_millis_string(&entry.stats.created),
            modifieddate: epoch_millis_string(&entry.stats.modified),
            size: entry.stats.size.to_string(),
            writable: entry.stats.writable.to_string(),
            children: entry.children.iter().map(WireEntry::from).collect(),
        }
    }
}

/// Wraps top-level listing entries in the synthetic `"root"` directory
/// envelope the original protocol emits for a directory GET. `root_uri` is
/// the listed path; the envelope carries it with a trailing slash.
pub fn listing_envelope(root_uri: &str, entries: &[Entry]) -> WireEntry {
    WireEntry {
        kind: "directory".to_string(),
        name: "root".to_string(),
        uri: format!("{}/", root_uri.trim_end_matches('/')),
        creationdate: String::new(),
        modifieddate: String::new(),
        size: String::new(),
        writable: String::new(),
        children: entries.iter().map(WireEntry::from).collect(),
    }
}

/// File metadata as returned by the `get-file-info` boundary: camel-case
/// keys, string values, a `readOnly` flag instead of `writable`.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Object))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireFileInfo {
    /// Creation time as an epoch-millisecond string.
    pub creation_date: String,
    /// Modification time as an epoch-millisecond string.
    pub modified_date: String,
    /// Size in bytes, as a string.
    pub size: String,
    /// `"true"` when the read-only bit is set.
    pub read_only: String,
}

impl From<&EntryStat> for WireFileInfo {
    fn from(stats: &EntryStat) -> Self {
        WireFileInfo {
            creation_date: epoch_millis_string(&stats.created),
            modified_date: epoch_millis_string(&stats.modified),
            size: stats.size.to_string(),
            read_only: (!stats.writable).to_string(),
        }
    }
}
