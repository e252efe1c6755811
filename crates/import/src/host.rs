//! Host capability boundary used by the local importer.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Operations a host environment may or may not expose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    pub directory_selection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry yielded while iterating a directory handle
pub enum HostEntry {
    File { name: String, size: u64 },
    Directory(Box<dyn DirectoryHandle>),
}

impl HostEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            HostEntry::File { .. } => EntryKind::File,
            HostEntry::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HostEntry::File { name, .. } => name,
            HostEntry::Directory(handle) => handle.name(),
        }
    }
}

impl std::fmt::Debug for HostEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostEntry::File { name, size } => f
                .debug_struct("File")
                .field("name", name)
                .field("size", size)
                .finish(),
            HostEntry::Directory(handle) => {
                f.debug_tuple("Directory").field(&handle.name()).finish()
            }
        }
    }
}

/// Readable directory granted by the host
#[async_trait]
pub trait DirectoryHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Entries in host iteration order.
    async fn entries(&self) -> io::Result<Vec<HostEntry>>;
}

/// Outcome of asking the host for a directory
pub enum DirectorySelection {
    Selected(Box<dyn DirectoryHandle>),
    Cancelled,
}

#[async_trait]
pub trait DirectoryHost: Send + Sync {
    fn capabilities(&self) -> HostCapabilities;

    async fn pick_directory(&self) -> io::Result<DirectorySelection>;
}

/// Directory handle over the local filesystem
#[derive(Debug, Clone)]
pub struct FsDirectoryHandle {
    name: String,
    path: PathBuf,
}

impl FsDirectoryHandle {
    /// Open `path`, failing if it is not a directory.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = tokio::fs::canonicalize(path.as_ref()).await?;
        let meta = tokio::fs::metadata(&path).await?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DirectoryHandle for FsDirectoryHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entries(&self) -> io::Result<Vec<HostEntry>> {
        let mut dir = tokio::fs::read_dir(&self.path).await?;
        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().await?;
            if file_type.is_file() {
                let size = entry.metadata().await?.len();
                entries.push(HostEntry::File { name, size });
            } else if file_type.is_dir() {
                entries.push(HostEntry::Directory(Box::new(FsDirectoryHandle {
                    name,
                    path: entry.path(),
                })));
            } else {
                log::debug!("Skipping non-regular entry {}", entry.path().display());
            }
        }
        Ok(entries)
    }
}

/// Host that always selects one preconfigured directory.
///
/// With no directory configured it reports no selection capability.
#[derive(Debug, Clone, Default)]
pub struct FsDirectoryHost {
    root: Option<PathBuf>,
}

impl FsDirectoryHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn unsupported() -> Self {
        Self { root: None }
    }
}

#[async_trait]
impl DirectoryHost for FsDirectoryHost {
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            directory_selection: self.root.is_some(),
        }
    }

    async fn pick_directory(&self) -> io::Result<DirectorySelection> {
        match &self.root {
            Some(root) => {
                let handle = FsDirectoryHandle::open(root).await?;
                Ok(DirectorySelection::Selected(Box::new(handle)))
            }
            None => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no directory configured",
            )),
        }
    }
}
