use std::{sync::Arc, time::Duration};

use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};

use crate::{ListingPageParser, ListingResult, ListingSearchFetcher, SearchError, StdResult};

/// The production address of APKMirror.
pub const APKMIRROR_SITE_URL: &str = "https://www.apkmirror.com";

/// A browser identification, the site rejects requests without one.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Searches release rows on APKMirror.
pub struct ApkMirrorListingFetcher {
    client: Client,
    site_url: String,
    parser: Arc<dyn ListingPageParser>,
}

impl ApkMirrorListingFetcher {
    /// Creates a new `ApkMirrorListingFetcher` instance.
    pub fn try_new(
        site_url: &str,
        timeout: Duration,
        parser: Arc<dyn ListingPageParser>,
    ) -> StdResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            site_url: format!("{}/", site_url.trim_end_matches('/')),
            parser,
        })
    }

    async fn fetch_search_page(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(&self.site_url)
            .query(&[
                ("post_type", "app_release"),
                ("searchtype", "apk"),
                ("s", query),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamUnavailable {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl ListingSearchFetcher for ApkMirrorListingFetcher {
    async fn try_search(
        &self,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ListingResult>, SearchError> {
        let markup = self.fetch_search_page(query).await?;
        let listings = self.parser.parse_listing_page(&markup, limit as usize);
        debug!("Parsed {} listing rows for query {query:?}", listings.len());

        Ok(listings)
    }
}
