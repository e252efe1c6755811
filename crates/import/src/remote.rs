use crate::config::ImportConfig;
use crate::validation::{parse_remote_locator, sanitize, RemoteLocator};
use crate::walker::tree_from_listing;
use async_trait::async_trait;
use codevision_domain::{
    collect_languages, ImportError, Project, ProjectDraft, ProjectSource, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteEntryKind {
    Blob,
    Tree,
}

/// One path of a remote content listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub path: String,
    pub kind: RemoteEntryKind,
    pub size: Option<u64>,
}

/// Repository metadata plus its content listing keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteListing {
    pub default_branch: Option<String>,
    pub entries: Vec<RemoteEntry>,
}

/// Remote fetch boundary
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(&self, locator: &RemoteLocator) -> Result<RemoteListing>;
}

/// Offline stand-in producing a fixed repository layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

#[async_trait]
impl RemoteSource for SyntheticSource {
    async fn fetch(&self, locator: &RemoteLocator) -> Result<RemoteListing> {
        log::debug!(
            "Synthesizing listing for {}/{}",
            locator.owner,
            locator.repo
        );
        let entry = |path: &str, kind, size| RemoteEntry {
            path: path.to_string(),
            kind,
            size,
        };
        Ok(RemoteListing {
            default_branch: Some("main".to_string()),
            entries: vec![
                entry("src", RemoteEntryKind::Tree, None),
                entry("src/components", RemoteEntryKind::Tree, None),
                entry("src/components/Header.js", RemoteEntryKind::Blob, Some(1024)),
                entry("src/components/Footer.js", RemoteEntryKind::Blob, Some(768)),
                entry("src/App.js", RemoteEntryKind::Blob, Some(2048)),
            ],
        })
    }
}

/// Imports projects from GitHub-style locators
#[derive(Clone)]
pub struct RemoteImporter {
    source: Arc<dyn RemoteSource>,
    config: ImportConfig,
}

impl RemoteImporter {
    pub fn new(source: Arc<dyn RemoteSource>, config: ImportConfig) -> Self {
        Self { source, config }
    }

    pub async fn import(&self, locator: &str) -> Result<Project> {
        let parsed =
            parse_remote_locator(locator).ok_or_else(|| ImportError::invalid_locator(locator))?;

        let listing = tokio::time::timeout(self.config.remote_timeout(), self.source.fetch(&parsed))
            .await
            .map_err(|_| {
                ImportError::unavailable(format!(
                    "la descarga de {}/{} superó {}ms",
                    parsed.owner, parsed.repo, self.config.remote_timeout_ms
                ))
            })??;

        let structure =
            tree_from_listing(&listing.entries, self.config.max_depth, &self.config.exclude);
        let languages = collect_languages(&structure);

        let project = sanitize(ProjectDraft {
            name: Some(parsed.repo.clone()),
            source: Some(ProjectSource::Remote),
            url: Some(locator.to_string()),
            structure: Some(structure),
            languages: Some(languages),
            owner: Some(parsed.owner.clone()),
            ..Default::default()
        });
        project.validate()?;

        log::info!(
            "Imported {}/{}@{}: {} files, languages {:?}",
            parsed.owner,
            parsed.repo,
            listing.default_branch.as_deref().unwrap_or("HEAD"),
            project.file_count(),
            project.metadata.languages
        );
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct Unreachable;

    #[async_trait]
    impl RemoteSource for Unreachable {
        async fn fetch(&self, _locator: &RemoteLocator) -> Result<RemoteListing> {
            Err(ImportError::unavailable("connection refused"))
        }
    }

    struct Slow;

    #[async_trait]
    impl RemoteSource for Slow {
        async fn fetch(&self, _locator: &RemoteLocator) -> Result<RemoteListing> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(RemoteListing::default())
        }
    }

    #[tokio::test]
    async fn synthetic_import_tags_remote_metadata() {
        let importer = RemoteImporter::new(Arc::new(SyntheticSource), ImportConfig::default());
        let project = importer
            .import("https://github.com/acme/widgets")
            .await
            .unwrap();

        assert_eq!(project.name, "widgets");
        assert_eq!(project.source, Some(ProjectSource::Remote));
        assert_eq!(project.metadata.owner.as_deref(), Some("acme"));
        assert_eq!(project.url.as_deref(), Some("https://github.com/acme/widgets"));
        assert_eq!(project.file_count(), 3);
        assert_eq!(
            project.metadata.languages.iter().collect::<Vec<_>>(),
            vec!["JavaScript"]
        );
    }

    #[tokio::test]
    async fn rejects_invalid_locator_before_fetching() {
        let importer = RemoteImporter::new(Arc::new(Unreachable), ImportConfig::default());
        let err = importer
            .import("https://gitlab.com/acme/widgets")
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidLocator(_)));
    }

    #[tokio::test]
    async fn surfaces_fetch_failures() {
        let importer = RemoteImporter::new(Arc::new(Unreachable), ImportConfig::default());
        let err = importer
            .import("https://github.com/acme/widgets")
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::SourceUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_times_out_as_unavailable() {
        let config = ImportConfig {
            remote_timeout_ms: 50,
            ..Default::default()
        };
        let importer = RemoteImporter::new(Arc::new(Slow), config);
        let err = importer
            .import("https://github.com/acme/widgets")
            .await
            .unwrap_err();
        match err {
            ImportError::SourceUnavailable(msg) => assert!(msg.contains("superó")),
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }
}
