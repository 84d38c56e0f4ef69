pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod scraping;
pub mod telemetry;
mod utils;

use tracing::info;

pub use config::ScrapeConfig;
pub use error::{ScrapeError, StepError};
pub use fetch::{HttpFetcher, PageFetcher};
pub use models::{EventDraft, EventRecord, Field, Pricing};
pub use scraping::{Extraction, Strategy};

/// Fetches event pages and extracts one normalized record per URL.
pub struct EventScraper<F = HttpFetcher> {
    fetcher: F,
}

impl EventScraper<HttpFetcher> {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher: HttpFetcher::new(config)?,
        })
    }
}

impl<F: PageFetcher> EventScraper<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn scrape(&self, url: &str) -> Result<EventRecord, ScrapeError> {
        self.scrape_detailed(url).map(|extraction| extraction.record)
    }

    pub fn scrape_detailed(&self, url: &str) -> Result<Extraction, ScrapeError> {
        let page_url = utils::parse_event_url(url)?;
        info!(url = %page_url, "fetching event page");
        let html = self.fetcher.fetch(&page_url)?;
        Ok(scraping::extract_html(&page_url, &html))
    }
}

/// Extracts from HTML that was already fetched. `url` picks the extractor
/// and anchors relative image references.
pub fn extract_from_html(url: &str, html: &str) -> Result<EventRecord, ScrapeError> {
    let page_url = utils::parse_event_url(url)?;
    Ok(scraping::extract_html(&page_url, html).record)
}
