//! # CodeVision Import
//!
//! Turns a remote locator or a local directory into a validated [`Project`].
//!
//! ## Pipeline
//!
//! ```text
//! Importer::Remote                     Importer::Local
//!     │                                    │
//!     ├──> parse owner/repo                ├──> DirectoryHost::pick_directory
//!     ├──> RemoteSource::fetch             ├──> walk_directory (depth-bounded)
//!     └──> tree_from_listing               │
//!               │                          │
//!               └────────────┬─────────────┘
//!                            ├──> collect_languages
//!                            ├──> sanitize
//!                            └──> Project::validate
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codevision_import::{ImportConfig, ImportService, Importer, SyntheticSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let importer = Importer::remote(Arc::new(SyntheticSource), ImportConfig::default());
//!     let project = importer
//!         .import_from_remote("https://github.com/acme/widgets")
//!         .await?;
//!
//!     println!("{} ({} files)", project.name, project.file_count());
//!     Ok(())
//! }
//! ```
//!
//! [`Project`]: codevision_domain::Project

mod config;
mod github;
mod host;
mod local;
mod port;
mod remote;
mod validation;
mod walker;

pub use codevision_domain::{ImportError, Result};
pub use config::ImportConfig;
pub use github::GitHubApiSource;
pub use host::{
    DirectoryHandle, DirectoryHost, DirectorySelection, EntryKind, FsDirectoryHandle,
    FsDirectoryHost, HostCapabilities, HostEntry,
};
pub use local::LocalImporter;
pub use port::{ImportService, Importer};
pub use remote::{
    RemoteEntry, RemoteEntryKind, RemoteImporter, RemoteListing, RemoteSource, SyntheticSource,
};
pub use validation::{
    parse_remote_locator, sanitize, validate_local_source, validate_remote_locator,
    RemoteLocator,
};
pub use walker::{tree_from_listing, walk_directory};
