use std::path::Path as StdPath;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// Service identity and health as reported by the status boundary.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Object))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct CloudStatus {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// The directory this instance serves.
    #[serde(rename = "server-root")]
    pub server_root: String,
    /// Always `"running"` while the process answers at all.
    pub status: String,
}

impl CloudStatus {
    /// Builds the status report for an instance serving `root`.
    pub fn current(root: &StdPath) -> Self {
        CloudStatus {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            server_root: root.display().to_string(),
            status: "running".to_string(),
        }
    }
}
