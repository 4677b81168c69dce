use std::collections::HashSet;
use std::path::Path as StdPath;
use std::str::FromStr;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::Error;

/// Which entry kinds a listing returns.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(poem_openapi::Enum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum ReturnScope {
    /// Files only (still subject to the extension filter).
    Files,
    /// Directories only.
    Directories,
    /// Both files and directories.
    #[default]
    All,
}

impl ReturnScope {
    pub(crate) fn includes_files(self) -> bool {
        matches!(self, ReturnScope::Files | ReturnScope::All)
    }

    pub(crate) fn includes_dirs(self) -> bool {
        matches!(self, ReturnScope::Directories | ReturnScope::All)
    }
}

impl FromStr for ReturnScope {
    type Err = Error;

    /// Parses the `return-type` header value. An absent or empty value means
    /// [`ReturnScope::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "files" => Ok(ReturnScope::Files),
            "directories" => Ok(ReturnScope::Directories),
            "all" | "" => Ok(ReturnScope::All),
            other => Err(Error::Parse {
                what: format!("return-type {other:?}"),
                how: "expected \"files\", \"directories\" or \"all\"".to_string(),
            }),
        }
    }
}

/// Caller-selected scope and filters for one listing call.
///
/// Directories and files are filtered independently: directories pass
/// whenever the scope includes them, while a file must additionally have its
/// extension in the allow-list. An empty list means no file matches at all,
/// so files are excluded by default unless explicitly filtered in.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListOptions {
    /// Whether to descend into subdirectories and populate their children.
    pub recursive: bool,
    /// Allowed file extensions, stored with their leading dot (".txt").
    pub filter: HashSet<String>,
    /// Which entry kinds to return.
    pub scope: ReturnScope,
}

impl ListOptions {
    /// Creates options with an empty filter: directories only, effectively,
    /// until extensions are allowed in.
    pub fn new(recursive: bool, scope: ReturnScope) -> Self {
        Self {
            recursive,
            filter: HashSet::new(),
            scope,
        }
    }

    /// Adds an extension to the allow-list. A missing leading dot is
    /// supplied, so `"txt"` and `".txt"` are equivalent.
    pub fn allow_extension(&mut self, ext: &str) {
        if ext.is_empty() {
            return;
        }
        if let Some(bare) = ext.strip_prefix('.') {
            self.filter.insert(format!(".{bare}"));
        } else {
            self.filter.insert(format!(".{ext}"));
        }
    }

    /// Builds options from the raw listing-control header values consumed at
    /// the resource boundary: `recursive` ("true"/else), `file-filters`
    /// (semicolon-separated extension list) and `return-type`.
    pub fn from_headers(
        recursive: Option<&str>,
        file_filters: Option<&str>,
        return_type: Option<&str>,
    ) -> Result<Self, Error> {
        let mut options = Self::new(
            recursive == Some("true"),
            ReturnScope::from_str(return_type.unwrap_or(""))?,
        );
        for ext in file_filters.unwrap_or("").split(';') {
            options.allow_extension(ext.trim());
        }
        Ok(options)
    }

    /// Whether a file with this base name passes the extension filter.
    /// Extensions are compared exactly, leading dot included.
    pub(crate) fn matches_file(&self, name: &str) -> bool {
        match StdPath::new(name).extension() {
            Some(ext) => self.filter.contains(&format!(".{}", ext.to_string_lossy())),
            None => false,
        }
    }
}
