use crate::tree::TreeNode;
use std::collections::BTreeSet;
use std::path::Path;

/// Language label attached to a file node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    React,
    ReactTypeScript,
    Python,
    Rust,
    Go,
    Java,
    Kotlin,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Swift,
    Html,
    Css,
    Json,
    Markdown,
    Shell,
    Unknown,
}

impl Language {
    /// Detect language from a bare extension (no leading dot, any case)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "jsx" => Language::React,
            "tsx" => Language::ReactTypeScript,
            "py" | "pyw" => Language::Python,
            "rs" => Language::Rust,
            "go" => Language::Go,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            "html" | "htm" => Language::Html,
            "css" | "scss" | "less" => Language::Css,
            "json" => Language::Json,
            "md" | "mdx" => Language::Markdown,
            "sh" | "bash" | "zsh" => Language::Shell,
            _ => Language::Unknown,
        }
    }

    /// Detect language from a file name.
    ///
    /// The extension is whatever follows the last `.`; names without a dot
    /// classify as [`Language::Unknown`].
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(Self::from_file_name)
            .unwrap_or(Language::Unknown)
    }

    /// Display label stored on file nodes
    pub fn label(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::React => "React",
            Language::ReactTypeScript => "React TypeScript",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Shell => "Shell",
            Language::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Collect the language label of every file in `nodes`, at any depth.
pub fn collect_languages(nodes: &[TreeNode]) -> BTreeSet<String> {
    nodes.iter().fold(BTreeSet::new(), |mut acc, node| {
        match node {
            TreeNode::File(file) => {
                acc.insert(file.language.clone());
            }
            TreeNode::Directory(dir) => acc.extend(collect_languages(&dir.children)),
        }
        acc
    })
}
