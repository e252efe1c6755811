use crate::config::ImportConfig;
use crate::host::DirectoryHost;
use crate::local::LocalImporter;
use crate::remote::{RemoteImporter, RemoteSource};
use crate::validation::{validate_local_source, validate_remote_locator};
use async_trait::async_trait;
use codevision_domain::{ImportError, Project, Result};
use std::sync::Arc;

/// Capability set every import strategy offers
#[async_trait]
pub trait ImportService: Send + Sync {
    async fn import_from_remote(&self, locator: &str) -> Result<Project>;

    async fn import_from_local_tree(&self) -> Result<Project>;

    fn validate_source(&self, locator: Option<&str>) -> bool;
}

#[async_trait]
impl ImportService for RemoteImporter {
    async fn import_from_remote(&self, locator: &str) -> Result<Project> {
        self.import(locator).await
    }

    async fn import_from_local_tree(&self) -> Result<Project> {
        Err(ImportError::unsupported(
            "el importador remoto no lee directorios locales",
        ))
    }

    fn validate_source(&self, locator: Option<&str>) -> bool {
        locator.is_some_and(validate_remote_locator)
    }
}

#[async_trait]
impl ImportService for LocalImporter {
    async fn import_from_remote(&self, _locator: &str) -> Result<Project> {
        Err(ImportError::unsupported(
            "el importador local no descarga repositorios remotos",
        ))
    }

    async fn import_from_local_tree(&self) -> Result<Project> {
        self.import().await
    }

    fn validate_source(&self, _locator: Option<&str>) -> bool {
        validate_local_source(&self.host().capabilities())
    }
}

/// Import strategy chosen by the caller
#[derive(Clone)]
pub enum Importer {
    Remote(RemoteImporter),
    Local(LocalImporter),
}

impl Importer {
    pub fn remote(source: Arc<dyn RemoteSource>, config: ImportConfig) -> Self {
        Importer::Remote(RemoteImporter::new(source, config))
    }

    pub fn local(host: Arc<dyn DirectoryHost>, config: ImportConfig) -> Self {
        Importer::Local(LocalImporter::new(host, config))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Importer::Remote(_) => "remote",
            Importer::Local(_) => "local",
        }
    }

    fn service(&self) -> &dyn ImportService {
        match self {
            Importer::Remote(remote) => remote,
            Importer::Local(local) => local,
        }
    }
}

#[async_trait]
impl ImportService for Importer {
    async fn import_from_remote(&self, locator: &str) -> Result<Project> {
        self.service().import_from_remote(locator).await
    }

    async fn import_from_local_tree(&self) -> Result<Project> {
        self.service().import_from_local_tree().await
    }

    fn validate_source(&self, locator: Option<&str>) -> bool {
        self.service().validate_source(locator)
    }
}
