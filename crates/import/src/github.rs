use crate::config::ImportConfig;
use crate::remote::{RemoteEntry, RemoteEntryKind, RemoteListing, RemoteSource};
use crate::validation::RemoteLocator;
use async_trait::async_trait;
use codevision_domain::{ImportError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

/// Listing source backed by the GitHub REST API (single page).
///
/// Requests are anonymous unless [`ImportConfig::token`] is set.
#[derive(Clone)]
pub struct GitHubApiSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiSource")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GitHubApiSource {
    pub fn new(config: &ImportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ImportError::unavailable(format!("no se pudo crear el cliente HTTP: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, GITHUB_ACCEPT);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {url}");
        let response = self
            .request(url)
            .send()
            .await
            .map_err(|e| ImportError::unavailable(format!("GET {url} falló: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::unavailable(format!(
                "GET {url} respondió {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ImportError::unavailable(format!("GET {url} respondió JSON inválido: {e}")))
    }
}

#[async_trait]
impl RemoteSource for GitHubApiSource {
    async fn fetch(&self, locator: &RemoteLocator) -> Result<RemoteListing> {
        let repo_url = format!(
            "{}/repos/{}/{}",
            self.base_url, locator.owner, locator.repo
        );
        let info: RepoInfo = self.get_json(&repo_url).await?;

        let branch = info.default_branch.clone().unwrap_or_else(|| "HEAD".to_string());
        let tree_url = format!("{repo_url}/git/trees/{branch}?recursive=1");
        let tree: TreeResponse = self.get_json(&tree_url).await?;
        if tree.truncated {
            log::warn!(
                "GitHub truncated the listing for {}/{}; structure is partial",
                locator.owner,
                locator.repo
            );
        }

        Ok(RemoteListing {
            default_branch: info.default_branch,
            entries: listing_entries(tree.tree),
        })
    }
}

fn listing_entries(items: Vec<TreeItem>) -> Vec<RemoteEntry> {
    items
        .into_iter()
        .filter_map(|item| {
            let kind = match item.kind.as_str() {
                "blob" => RemoteEntryKind::Blob,
                "tree" => RemoteEntryKind::Tree,
                // submodules ("commit") have no content to list
                _ => return None,
            };
            Some(RemoteEntry {
                path: item.path,
                kind,
                size: item.size,
            })
        })
        .collect()
}
