use crate::ListingResult;

/// A trait for extracting release rows from a listing page.
#[cfg_attr(test, mockall::automock)]
pub trait ListingPageParser: Sync + Send {
    /// Parses the first `limit` release rows of the page, in document order.
    ///
    /// Rows that can't be parsed count towards the limit but are left out.
    fn parse_listing_page(&self, markup: &str, limit: usize) -> Vec<ListingResult>;
}
