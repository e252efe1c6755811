use crate::config::ImportConfig;
use crate::host::{DirectoryHost, DirectorySelection};
use crate::validation::{sanitize, validate_local_source};
use crate::walker::walk_directory;
use codevision_domain::{
    collect_languages, ImportError, Project, ProjectDraft, ProjectSource, Result,
};
use std::sync::Arc;

/// Imports projects from a directory granted by the host
#[derive(Clone)]
pub struct LocalImporter {
    host: Arc<dyn DirectoryHost>,
    config: ImportConfig,
}

impl LocalImporter {
    pub fn new(host: Arc<dyn DirectoryHost>, config: ImportConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &dyn DirectoryHost {
        self.host.as_ref()
    }

    pub async fn import(&self) -> Result<Project> {
        if !validate_local_source(&self.host.capabilities()) {
            return Err(ImportError::unsupported(
                "el entorno no permite seleccionar directorios",
            ));
        }

        let selection = tokio::time::timeout(self.config.local_timeout(), self.host.pick_directory())
            .await
            .map_err(|_| {
                ImportError::unsupported(format!(
                    "la selección de directorio superó {}ms",
                    self.config.local_timeout_ms
                ))
            })?
            .map_err(|e| ImportError::failed(format!("la selección de directorio falló: {e}")))?;

        let handle = match selection {
            DirectorySelection::Selected(handle) => handle,
            DirectorySelection::Cancelled => {
                log::info!("Directory selection cancelled");
                return Err(ImportError::UserCancelled);
            }
        };

        let structure = walk_directory(handle.as_ref(), self.config.max_depth)
            .await
            .map_err(|e| ImportError::failed(format!("leyendo {}: {e}", handle.name())))?;
        let languages = collect_languages(&structure);

        let project = sanitize(ProjectDraft {
            name: Some(handle.name().to_string()),
            source: Some(ProjectSource::Local),
            structure: Some(structure),
            languages: Some(languages),
            ..Default::default()
        });
        project.validate()?;

        log::info!(
            "Imported local directory {}: {} files",
            project.name,
            project.file_count()
        );
        Ok(project)
    }
}
