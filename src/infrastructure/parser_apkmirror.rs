use anyhow::anyhow;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{ListingPageParser, ListingResult, StdResult};

const ROW_SELECTOR: &str = ".appRow";
const TITLE_SELECTOR: &str = ".appRowTitle a";
const VERSION_SELECTOR: &str = ".infoSlide-value";
const DATE_SELECTOR: &str = ".date";
const SIZE_SELECTOR: &str = ".filesize";

fn parse_selector(selector: &str) -> StdResult<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector {selector:?}: {e}"))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts release rows from an APKMirror search page.
pub struct ApkMirrorPageParser {
    base_url: Url,
    row_selector: Selector,
    title_selector: Selector,
    version_selector: Selector,
    date_selector: Selector,
    size_selector: Selector,
}

impl ApkMirrorPageParser {
    /// Creates a new `ApkMirrorPageParser` resolving relative links against `base_url`.
    pub fn try_new(base_url: &str) -> StdResult<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            row_selector: parse_selector(ROW_SELECTOR)?,
            title_selector: parse_selector(TITLE_SELECTOR)?,
            version_selector: parse_selector(VERSION_SELECTOR)?,
            date_selector: parse_selector(DATE_SELECTOR)?,
            size_selector: parse_selector(SIZE_SELECTOR)?,
        })
    }

    fn select_text(&self, row: ElementRef<'_>, selector: &Selector) -> Option<String> {
        row.select(selector).next().map(element_text)
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<ListingResult> {
        let Some(title_anchor) = row.select(&self.title_selector).next() else {
            debug!("Skipping listing row without title anchor");
            return None;
        };
        let href = title_anchor.value().attr("href")?;
        let url = match self.base_url.join(href.trim()) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping listing row with invalid link {href:?}: {e}");
                return None;
            }
        };
        let version = self.select_text(row, &self.version_selector);
        let date = self.select_text(row, &self.date_selector);
        let size = self.select_text(row, &self.size_selector);

        Some(ListingResult::new(
            &element_text(title_anchor),
            url.as_str(),
            version.as_deref(),
            date.as_deref(),
            size.as_deref(),
        ))
    }
}

impl ListingPageParser for ApkMirrorPageParser {
    fn parse_listing_page(&self, markup: &str, limit: usize) -> Vec<ListingResult> {
        let document = Html::parse_document(markup);

        document
            .select(&self.row_selector)
            .take(limit)
            .filter_map(|row| self.parse_row(row))
            .collect()
    }
}
