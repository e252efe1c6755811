//! # CodeVision Domain
//!
//! Canonical shapes shared by every stage of the import pipeline.
//!
//! ## Pipeline
//!
//! ```text
//! Source (remote locator | local directory)
//!     │
//!     ├──> Importer (codevision-import)
//!     │      └─> TreeNode[] + language set
//!     │
//!     ├──> sanitize / Project::create
//!     │      └─> Project
//!     │
//!     ├──> Project::validate
//!     │
//!     └──> ProjectRepository (codevision-store)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codevision_domain::{Project, ProjectDraft, ProjectSource, TreeNode};
//!
//! let project = Project::create(ProjectDraft {
//!     name: Some("widgets".to_string()),
//!     source: Some(ProjectSource::Local),
//!     structure: Some(vec![TreeNode::file("main.rs", 120)]),
//!     ..Default::default()
//! });
//!
//! assert!(project.validate().is_ok());
//! assert!(project.metadata.languages.is_empty());
//! ```

mod error;
mod error_handler;
mod language;
mod project;
mod tree;

pub use error::{ErrorCode, ImportError, ProjectError, Result};
pub use error_handler::{handle, report, ErrorReport, ErrorState, DEFAULT_MESSAGE};
pub use language::{collect_languages, Language};
pub use project::{
    Project, ProjectDraft, ProjectMetadata, ProjectSource, DEFAULT_PROJECT_NAME,
};
pub use tree::{DirectoryNode, FileNode, TreeNode};
