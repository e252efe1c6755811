use codevision_domain::{Project, TreeNode};
use console::style;
use std::fmt::Write;

fn source_label(project: &Project) -> &'static str {
    project.source.map(|s| s.as_str()).unwrap_or("unknown")
}

fn languages(project: &Project) -> String {
    let joined = project
        .metadata
        .languages
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

/// One line per project: id, name, source, file count, languages.
pub fn render_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects imported yet".to_string();
    }
    let mut out = String::new();
    for project in projects {
        let _ = writeln!(
            out,
            "{}  {}  [{}]  {} files  {}",
            style(&project.id).dim(),
            style(&project.name).bold(),
            source_label(project),
            project.file_count(),
            languages(project)
        );
    }
    out.trim_end().to_string()
}

fn write_details(project: &Project, out: &mut String) {
    let _ = writeln!(out, "  id:        {}", project.id);
    if let Some(owner) = &project.metadata.owner {
        let _ = writeln!(out, "  owner:     {owner}");
    }
    if let Some(url) = &project.url {
        let _ = writeln!(out, "  url:       {url}");
    }
    let _ = writeln!(out, "  files:     {}", project.file_count());
    let _ = writeln!(out, "  languages: {}", languages(project));
}

pub fn render_summary(project: &Project) -> String {
    let mut out = format!(
        "{} {} ({})\n",
        style("Imported").green().bold(),
        style(&project.name).bold(),
        source_label(project)
    );
    write_details(project, &mut out);
    out.trim_end().to_string()
}

/// Details followed by the indented tree; truncated directories end in `…`.
pub fn render_project(project: &Project) -> String {
    let mut out = format!(
        "{} ({})\n",
        style(&project.name).bold(),
        source_label(project)
    );
    write_details(project, &mut out);
    let _ = writeln!(
        out,
        "  updated:   {}",
        project.metadata.last_updated.to_rfc3339()
    );
    render_nodes(&project.structure, 1, &mut out);
    out.trim_end().to_string()
}

fn render_nodes(nodes: &[TreeNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            TreeNode::File(file) => {
                let _ = writeln!(
                    out,
                    "{indent}{}  {}  {} B",
                    file.name,
                    style(&file.language).dim(),
                    file.size
                );
            }
            TreeNode::Directory(dir) => {
                if dir.truncated {
                    let _ = writeln!(out, "{indent}{}/ {}", dir.name, style("…").dim());
                } else {
                    let _ = writeln!(out, "{indent}{}/", dir.name);
                    render_nodes(&dir.children, depth + 1, out);
                }
            }
        }
    }
}
