use crate::host::HostCapabilities;
use codevision_domain::{
    collect_languages, Project, ProjectDraft, ProjectSource, DEFAULT_PROJECT_NAME,
};
use once_cell::sync::Lazy;
use regex::Regex;

static REMOTE_LOCATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/([A-Za-z0-9-]+)/([A-Za-z0-9-]+)/?$")
        .expect("locator regex")
});

/// `owner/repo` pair extracted from an accepted locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocator {
    pub owner: String,
    pub repo: String,
}

pub fn validate_remote_locator(url: &str) -> bool {
    REMOTE_LOCATOR.is_match(url)
}

/// Split an accepted locator into owner and repository.
pub fn parse_remote_locator(url: &str) -> Option<RemoteLocator> {
    let caps = REMOTE_LOCATOR.captures(url)?;
    Some(RemoteLocator {
        owner: caps.get(1)?.as_str().to_string(),
        repo: caps.get(2)?.as_str().to_string(),
    })
}

pub fn validate_local_source(capabilities: &HostCapabilities) -> bool {
    capabilities.directory_selection
}

/// Normalize a partial import payload into a structurally complete project.
///
/// Total: every input, including [`ProjectDraft::default`], yields a project.
/// The result is not validated.
pub fn sanitize(raw: ProjectDraft) -> Project {
    let source = raw.source.unwrap_or(ProjectSource::Unknown);
    let name = raw
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    let structure = raw.structure.unwrap_or_default();
    let languages = raw
        .languages
        .unwrap_or_else(|| collect_languages(&structure));
    let url = raw.url.filter(|_| source == ProjectSource::Remote);

    Project::create(ProjectDraft {
        id: raw.id.filter(|id| !id.trim().is_empty()),
        name: Some(name),
        source: Some(source),
        url,
        structure: Some(structure),
        languages: Some(languages),
        last_updated: raw.last_updated,
        owner: raw.owner,
    })
}
