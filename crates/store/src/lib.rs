//! # CodeVision Store
//!
//! Persistence for imported projects.
//!
//! ## Layout
//!
//! ```text
//! ProjectRepository (port)
//!     │
//!     └──> KeyedProjectRepository
//!            │   one JSON array under a fixed key
//!            │
//!            └──> KeyValueStore
//!                   ├─> FileKeyValueStore   (<dir>/<key>.json)
//!                   └─> MemoryKeyValueStore
//! ```
//!
//! `save` is an unsynchronized read-modify-write of the whole collection:
//! two writers racing on the same key can lose one update.
//!
//! ## Example
//!
//! ```no_run
//! use codevision_domain::{Project, ProjectDraft, ProjectSource};
//! use codevision_store::{FileKeyValueStore, KeyedProjectRepository, ProjectRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = KeyedProjectRepository::new(FileKeyValueStore::new(".codevision"));
//!     let project = Project::create(ProjectDraft {
//!         name: Some("widgets".to_string()),
//!         source: Some(ProjectSource::Local),
//!         ..Default::default()
//!     });
//!     repo.save(project.clone()).await?;
//!     assert!(repo.find_by_id(&project.id).await?.is_some());
//!     Ok(())
//! }
//! ```

mod error;
mod kv;
mod repository;

pub use error::{Result, StoreError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use repository::{KeyedProjectRepository, ProjectRepository, PROJECTS_KEY};
