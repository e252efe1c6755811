use crate::host::{DirectoryHandle, HostEntry};
use crate::remote::{RemoteEntry, RemoteEntryKind};
use codevision_domain::TreeNode;
use std::future::Future;
use std::io;
use std::pin::Pin;

type WalkFuture<'a> = Pin<Box<dyn Future<Output = io::Result<Vec<TreeNode>>> + Send + 'a>>;

/// Depth-first walk of `handle`, preserving host iteration order.
///
/// The root listing is depth 0. Directories found in the listing at
/// `max_depth` are emitted with no children and `truncated` set.
pub async fn walk_directory(
    handle: &dyn DirectoryHandle,
    max_depth: usize,
) -> io::Result<Vec<TreeNode>> {
    walk_at(handle, 0, max_depth).await
}

fn walk_at<'a>(handle: &'a dyn DirectoryHandle, depth: usize, max_depth: usize) -> WalkFuture<'a> {
    Box::pin(async move {
        if depth > max_depth {
            return Ok(Vec::new());
        }

        log::debug!("Walking {} at depth {}", handle.name(), depth);
        let entries = handle.entries().await?;
        let mut nodes = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                HostEntry::File { name, size } => nodes.push(TreeNode::file(name, size)),
                HostEntry::Directory(child) if depth + 1 > max_depth => {
                    log::debug!("Depth bound reached at {}", child.name());
                    nodes.push(TreeNode::truncated_directory(child.name()));
                }
                HostEntry::Directory(child) => {
                    let children = walk_at(child.as_ref(), depth + 1, max_depth).await?;
                    nodes.push(TreeNode::directory(child.name(), children));
                }
            }
        }
        Ok(nodes)
    })
}

/// Build a tree from a flat, path-keyed listing under the same depth bound
/// as [`walk_directory`].
///
/// Listing order is kept; parents missing from the listing are created on
/// first use. Entries with any path segment matching `exclude` are skipped.
pub fn tree_from_listing(
    entries: &[RemoteEntry],
    max_depth: usize,
    exclude: &[String],
) -> Vec<TreeNode> {
    let mut root = DirBuilder::new(String::new(), false);

    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }
        if segments
            .iter()
            .any(|segment| exclude.iter().any(|skip| skip == segment))
        {
            log::debug!("Skipping excluded path {}", entry.path);
            continue;
        }
        root.insert(&segments, 0, entry, max_depth);
    }

    root.into_children()
}

struct DirBuilder {
    name: String,
    truncated: bool,
    children: Vec<Built>,
}

enum Built {
    File { name: String, size: u64 },
    Dir(DirBuilder),
}

impl DirBuilder {
    fn new(name: String, truncated: bool) -> Self {
        Self {
            name,
            truncated,
            children: Vec::new(),
        }
    }

    /// Insert `segments[depth..]` into this directory, whose listing sits at `depth`.
    fn insert(&mut self, segments: &[&str], depth: usize, entry: &RemoteEntry, max_depth: usize) {
        if self.truncated {
            return;
        }
        let Some((head, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() && entry.kind == RemoteEntryKind::Blob {
            self.children.push(Built::File {
                name: head.to_string(),
                size: entry.size.unwrap_or(0),
            });
            return;
        }

        let dir = self.dir_mut(head, depth >= max_depth);
        if !rest.is_empty() {
            dir.insert(rest, depth + 1, entry, max_depth);
        }
    }

    fn dir_mut(&mut self, name: &str, truncated: bool) -> &mut DirBuilder {
        let existing = self
            .children
            .iter()
            .position(|child| matches!(child, Built::Dir(dir) if dir.name == name));
        let index = match existing {
            Some(index) => index,
            None => {
                self.children
                    .push(Built::Dir(DirBuilder::new(name.to_string(), truncated)));
                self.children.len() - 1
            }
        };
        match &mut self.children[index] {
            Built::Dir(dir) => dir,
            Built::File { .. } => unreachable!("position matched a directory"),
        }
    }

    fn into_children(self) -> Vec<TreeNode> {
        self.children
            .into_iter()
            .map(|child| match child {
                Built::File { name, size } => TreeNode::file(name, size),
                Built::Dir(dir) if dir.truncated => TreeNode::truncated_directory(dir.name),
                Built::Dir(dir) => {
                    let name = dir.name.clone();
                    TreeNode::directory(name, dir.into_children())
                }
            })
            .collect()
    }
}
