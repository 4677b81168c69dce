//! Sandboxed, serializable filesystem core for a local cloud file server.
//!
//! A remote client (typically a browser-based file manager) addresses files
//! and directories by path fragments taken from request URIs. This crate is
//! the part of such a server with real invariants: every fragment passes
//! through a [`PathGuard`] that confines it to the served root before any
//! I/O, and directory GETs build their response through a recursive tree
//! lister with per-kind filtering. Transport, routing and authentication
//! live elsewhere; the handler layer talks to [`CloudFs`] and serializes the
//! typed results through the [`wire`] shapes.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # use localcloud::{CloudFs, ListOptions, ReturnScope};
//! let root = std::env::current_dir().unwrap();
//! let cloud = CloudFs::new(&root);
//! let mut options = ListOptions::new(false, ReturnScope::Files);
//! options.allow_extension("toml");
//! let fragment = root.display().to_string().trim_start_matches('/').to_string();
//! let entries = cloud.list(&fragment, &options).await.unwrap();
//! assert!(entries.iter().any(|e| e.name == "Cargo.toml"));
//! # })
//! ```
//!
//! A serialized listing might look like
//! ```json
//! {
//!   "type": "directory",
//!   "name": "root",
//!   "uri": "/srv/data/",
//!   "children": [
//!     {
//!       "type": "file",
//!       "name": "notes.txt",
//!       "uri": "/srv/data/notes.txt",
//!       "creationdate": "1517077809453",
//!       "modifieddate": "1517077809453",
//!       "size": "1581",
//!       "writable": "true"
//!     }
//!   ]
//! }
//! ```

mod cloud;
mod entry;
mod errors;
mod guard;
mod list;
mod options;
mod ops;
mod status;
pub mod utils;
pub mod wire;

pub use cloud::CloudFs;
pub use entry::Entry;
pub use entry::EntryKind;
pub use entry::EntryStat;
pub use errors::Error;
pub use guard::PathGuard;
pub use guard::Resolved;
pub use list::list_tree;
pub use options::ListOptions;
pub use options::ReturnScope;
pub use status::CloudStatus;

#[cfg(feature = "test_utils")]
pub(crate) mod test_utils;
#[cfg(feature = "test_utils")]
pub use test_utils::TestRoot;
