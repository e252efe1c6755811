use async_trait::async_trait;
use codevision_import::{DirectoryHost, DirectorySelection, FsDirectoryHandle, HostCapabilities};
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io;

/// Asks for a directory path on the terminal.
///
/// Selection is only offered when stderr is attached to a terminal; an empty
/// answer counts as a cancelled selection. The prompt blocks a runtime thread
/// until answered, so the binary shuts its runtime down in the background.
#[derive(Debug, Default)]
pub struct PromptDirectoryHost;

impl PromptDirectoryHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DirectoryHost for PromptDirectoryHost {
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            directory_selection: Term::stderr().is_term(),
        }
    }

    async fn pick_directory(&self) -> io::Result<DirectorySelection> {
        let answer = tokio::task::spawn_blocking(|| {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Directory to import (empty to cancel)")
                .allow_empty(true)
                .interact_text_on(&Term::stderr())
        })
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;

        let answer = answer.trim();
        if answer.is_empty() {
            log::debug!("Directory prompt left empty");
            return Ok(DirectorySelection::Cancelled);
        }
        let handle = FsDirectoryHandle::open(answer).await?;
        log::debug!("Selected directory {}", handle.path().display());
        Ok(DirectorySelection::Selected(Box::new(handle)))
    }
}
