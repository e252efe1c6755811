use crate::error::Result;
use crate::kv::KeyValueStore;
use async_trait::async_trait;
use codevision_domain::Project;

/// Namespace key holding the serialized project collection.
pub const PROJECTS_KEY: &str = "codeVisionProjects";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace by `id`, returning the stored project.
    async fn save(&self, project: Project) -> Result<Project>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>>;

    /// All projects in the order they were last persisted.
    async fn find_all(&self) -> Result<Vec<Project>>;
}

/// Stores every project as one JSON array under a single key
pub struct KeyedProjectRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyedProjectRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PROJECTS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: KeyValueStore> ProjectRepository for KeyedProjectRepository<S> {
    async fn save(&self, project: Project) -> Result<Project> {
        project.validate()?;

        let mut projects = self.find_all().await?;
        match projects.iter().position(|p| p.id == project.id) {
            Some(index) => {
                log::debug!("Replacing project {}", project.id);
                projects[index] = project.clone();
            }
            None => {
                log::debug!("Appending project {}", project.id);
                projects.push(project.clone());
            }
        }

        let data = serde_json::to_string(&projects)?;
        self.store.set(&self.key, data).await?;
        log::info!("Saved project {} ({})", project.name, project.id);
        Ok(project)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.find_all().await?.into_iter().find(|p| p.id == id))
    }

    async fn find_all(&self) -> Result<Vec<Project>> {
        match self.store.get(&self.key).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::MemoryKeyValueStore;
    use codevision_domain::{ProjectDraft, ProjectError, ProjectSource, TreeNode};
    use pretty_assertions::assert_eq;

    fn project(id: &str, name: &str) -> Project {
        Project::create(ProjectDraft {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            source: Some(ProjectSource::Local),
            structure: Some(vec![TreeNode::file("main.rs", 1)]),
            ..Default::default()
        })
    }

    fn repo() -> KeyedProjectRepository<MemoryKeyValueStore> {
        KeyedProjectRepository::new(MemoryKeyValueStore::new())
    }

    #[tokio::test]
    async fn empty_store_yields_empty_collection() {
        let repo = repo();
        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn second_save_with_same_id_wins() {
        let repo = repo();
        repo.save(project("p1", "first")).await.unwrap();
        repo.save(project("p1", "second")).await.unwrap();

        let found = repo.find_by_id("p1").await.unwrap().unwrap();
        assert_eq!(found.name, "second");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn repeated_save_is_idempotent() {
        let repo = repo();
        let p = project("p1", "widgets");

        repo.save(p.clone()).await.unwrap();
        let after_first = repo.store().get(PROJECTS_KEY).await.unwrap();
        repo.save(p.clone()).await.unwrap();
        repo.save(p).await.unwrap();
        let after_third = repo.store().get(PROJECTS_KEY).await.unwrap();

        assert_eq!(after_first, after_third);
    }

    #[tokio::test]
    async fn replacement_keeps_position() {
        let repo = repo();
        repo.save(project("a", "a")).await.unwrap();
        repo.save(project("b", "b")).await.unwrap();
        repo.save(project("c", "c")).await.unwrap();
        repo.save(project("b", "b2")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b2", "c"]);
    }

    #[tokio::test]
    async fn invalid_projects_are_not_persisted() {
        let repo = repo();
        let nameless = Project::create(ProjectDraft {
            source: Some(ProjectSource::Local),
            ..Default::default()
        });

        let err = repo.save(nameless).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidProject(ProjectError::MissingName)
        ));
        assert_eq!(repo.store().get(PROJECTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_collection_is_an_error() {
        let repo = repo();
        repo.store()
            .set(PROJECTS_KEY, "{not json".to_string())
            .await
            .unwrap();
        assert!(matches!(
            repo.find_all().await,
            Err(StoreError::SerializationError(_))
        ));
    }
}
