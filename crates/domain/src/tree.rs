use crate::language::Language;
use serde::{Deserialize, Serialize};

/// One entry of a project's structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File(FileNode),
    Directory(DirectoryNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default = "unknown_language")]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    /// Children were not read because the walk hit its depth bound.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

fn unknown_language() -> String {
    Language::Unknown.label().to_string()
}

impl TreeNode {
    /// File node with its language classified from `name`
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let language = Language::from_file_name(&name).label().to_string();
        TreeNode::File(FileNode {
            name,
            size,
            language,
        })
    }

    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Directory(DirectoryNode {
            name: name.into(),
            children,
            truncated: false,
        })
    }

    /// Directory whose children were cut off by the depth bound
    pub fn truncated_directory(name: impl Into<String>) -> Self {
        TreeNode::Directory(DirectoryNode {
            name: name.into(),
            children: Vec::new(),
            truncated: true,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => &file.name,
            TreeNode::Directory(dir) => &dir.name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Number of file nodes at any depth below (and including) this node
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File(_) => 1,
            TreeNode::Directory(dir) => dir.children.iter().map(TreeNode::file_count).sum(),
        }
    }
}
