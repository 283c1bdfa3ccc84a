use log::warn;

use crate::{ListingResult, RepositoryResult, SearchError};

/// Default number of results requested by a search.
pub const DEFAULT_SEARCH_LIMIT: u16 = 5;

/// A trait for searching repositories on a code-hosting site.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositorySearchFetcher: Sync + Send {
    /// Searches repositories matching the query, most starred first.
    async fn try_search(
        &self,
        query: &str,
        limit: u16,
    ) -> Result<Vec<RepositoryResult>, SearchError>;

    /// Searches repositories matching the query, any failure yielding no results.
    async fn search(&self, query: &str, limit: u16) -> Vec<RepositoryResult> {
        self.try_search(query, limit).await.unwrap_or_else(|e| {
            warn!("Repository search failed for query {query:?}: {e}");
            vec![]
        })
    }
}

/// A trait for searching releases on a listing site.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ListingSearchFetcher: Sync + Send {
    /// Searches release rows matching the query, in document order.
    async fn try_search(&self, query: &str, limit: u16) -> Result<Vec<ListingResult>, SearchError>;

    /// Searches release rows matching the query, any failure yielding no results.
    async fn search(&self, query: &str, limit: u16) -> Vec<ListingResult> {
        self.try_search(query, limit).await.unwrap_or_else(|e| {
            warn!("Listing search failed for query {query:?}: {e}");
            vec![]
        })
    }
}
