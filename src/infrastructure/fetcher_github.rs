use std::time::Duration;

use futures::{StreamExt, stream};
use log::{debug, warn};
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::Deserialize;

use crate::{RepositoryResult, RepositorySearchFetcher, SearchError, StdResult};

/// The REST production endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// The file extension of the release assets looked up.
pub const PACKAGE_FILE_EXTENSION: &str = ".apk";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize, Debug)]
struct SearchRepositoriesData {
    #[serde(default)]
    items: Vec<RepositoryItem>,
}

#[derive(Deserialize, Debug)]
struct RepositoryItem {
    full_name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u32,
    language: Option<String>,
}

impl From<RepositoryItem> for RepositoryResult {
    fn from(item: RepositoryItem) -> Self {
        RepositoryResult::new(
            &item.full_name,
            &item.html_url,
            item.description.as_deref(),
            item.stargazers_count,
            item.language.as_deref(),
        )
    }
}

#[derive(Deserialize, Debug)]
struct LatestReleaseData {
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Deserialize, Debug)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

/// Searches repositories with the GitHub REST API and looks up the package asset
/// of their latest release.
pub struct GitHubRepositoryFetcher {
    client: Client,
    endpoint: String,
    max_concurrent_lookups: usize,
}

impl GitHubRepositoryFetcher {
    /// Creates a new `GitHubRepositoryFetcher` instance.
    ///
    /// Every request is bounded by `timeout`, and at most `max_concurrent_lookups`
    /// release lookups run at the same time.
    pub fn try_new(
        endpoint: &str,
        timeout: Duration,
        max_concurrent_lookups: usize,
    ) -> StdResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        })
    }

    async fn search_repositories(
        &self,
        query: &str,
        limit: u16,
    ) -> Result<Vec<RepositoryItem>, SearchError> {
        let per_page = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search/repositories", self.endpoint))
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamUnavailable {
                status: status.as_u16(),
            });
        }
        let data: SearchRepositoriesData = response.json().await?;

        Ok(data.items)
    }

    async fn fetch_latest_release(
        &self,
        full_name: &str,
    ) -> Result<LatestReleaseData, SearchError> {
        let response = self
            .client
            .get(format!(
                "{}/repos/{full_name}/releases/latest",
                self.endpoint
            ))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::SecondaryLookupFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    async fn find_release_asset_url(&self, full_name: &str) -> Option<String> {
        match self.fetch_latest_release(full_name).await {
            Ok(release) => release
                .assets
                .into_iter()
                .find(|asset| asset.name.ends_with(PACKAGE_FILE_EXTENSION))
                .map(|asset| asset.browser_download_url),
            Err(e @ SearchError::SecondaryLookupFailed { .. }) => {
                debug!("No latest release for {full_name}: {e}");
                None
            }
            Err(e) => {
                warn!("Release lookup failed for {full_name}: {e}");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl RepositorySearchFetcher for GitHubRepositoryFetcher {
    async fn try_search(
        &self,
        query: &str,
        limit: u16,
    ) -> Result<Vec<RepositoryResult>, SearchError> {
        let items = self.search_repositories(query, limit).await?;
        debug!("Found {} repositories for query {query:?}", items.len());

        let fetcher = self;
        let repositories = stream::iter(items)
            .map(move |item| async move {
                let release_asset_url = fetcher.find_release_asset_url(&item.full_name).await;
                RepositoryResult::from(item).with_release_asset_url(release_asset_url)
            })
            .buffered(self.max_concurrent_lookups)
            .collect::<Vec<_>>()
            .await;

        Ok(repositories)
    }
}
