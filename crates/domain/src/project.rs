use crate::error::ProjectError;
use crate::tree::TreeNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Name given to imports that arrive without one.
pub const DEFAULT_PROJECT_NAME: &str = "Proyecto Sin Nombre";

/// Where a project was imported from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSource {
    Remote,
    Local,
    Unknown,
}

impl ProjectSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectSource::Remote => "remote",
            ProjectSource::Local => "local",
            ProjectSource::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub languages: BTreeSet<String>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// An imported project.
///
/// `source` is optional only so that [`Project::create`] can represent an
/// incomplete draft; [`Project::validate`] rejects it before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub source: Option<ProjectSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub structure: Vec<TreeNode>,
    pub metadata: ProjectMetadata,
}

/// Raw, possibly partial import payload.
///
/// Every field is optional; this is the input shape of both
/// [`Project::create`] and the sanitizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub source: Option<ProjectSource>,
    pub url: Option<String>,
    pub structure: Option<Vec<TreeNode>>,
    pub languages: Option<BTreeSet<String>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub owner: Option<String>,
}

impl Project {
    /// Build a project from raw fields, filling identity and metadata defaults.
    ///
    /// `name` and `source` are taken as given; call [`Project::validate`]
    /// before persisting.
    pub fn create(draft: ProjectDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            name: draft.name.unwrap_or_default(),
            source: draft.source,
            url: draft.url,
            structure: draft.structure.unwrap_or_default(),
            metadata: ProjectMetadata {
                languages: draft.languages.unwrap_or_default(),
                last_updated: draft.last_updated.unwrap_or_else(Utc::now),
                owner: draft.owner,
            },
        }
    }

    /// Check the invariants every persisted project must hold.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.name.trim().is_empty() {
            return Err(ProjectError::MissingName);
        }
        if self.source.is_none() {
            return Err(ProjectError::MissingSource);
        }
        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.structure.iter().map(TreeNode::file_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_fills_defaults() {
        let before = Utc::now();
        let project = Project::create(ProjectDraft::default());

        assert!(!project.id.is_empty());
        assert!(project.structure.is_empty());
        assert!(project.metadata.languages.is_empty());
        assert!(project.metadata.last_updated >= before);
        assert_eq!(project.metadata.owner, None);
    }

    #[test]
    fn create_keeps_given_id() {
        let project = Project::create(ProjectDraft {
            id: Some("p1".to_string()),
            ..Default::default()
        });
        assert_eq!(project.id, "p1");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Project::create(ProjectDraft::default());
        let b = Project::create(ProjectDraft::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn validate_requires_name_then_source() {
        let nameless = Project::create(ProjectDraft {
            source: Some(ProjectSource::Local),
            ..Default::default()
        });
        assert!(matches!(nameless.validate(), Err(ProjectError::MissingName)));

        let blank = Project::create(ProjectDraft {
            name: Some("   ".to_string()),
            source: Some(ProjectSource::Local),
            ..Default::default()
        });
        assert!(matches!(blank.validate(), Err(ProjectError::MissingName)));

        let sourceless = Project::create(ProjectDraft {
            name: Some("widgets".to_string()),
            ..Default::default()
        });
        assert!(matches!(sourceless.validate(), Err(ProjectError::MissingSource)));
    }

    #[test]
    fn validate_accepts_complete_project() {
        let project = Project::create(ProjectDraft {
            name: Some("widgets".to_string()),
            source: Some(ProjectSource::Unknown),
            ..Default::default()
        });
        assert!(project.validate().is_ok());
    }

    #[test]
    fn json_shape_uses_camel_case_metadata() {
        let project = Project::create(ProjectDraft {
            id: Some("p1".to_string()),
            name: Some("widgets".to_string()),
            source: Some(ProjectSource::Remote),
            url: Some("https://github.com/acme/widgets".to_string()),
            owner: Some("acme".to_string()),
            ..Default::default()
        });

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["source"], "remote");
        assert_eq!(value["metadata"]["owner"], "acme");
        assert!(value["metadata"]["lastUpdated"].is_string());

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
    }
}
