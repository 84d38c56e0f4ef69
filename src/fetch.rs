use anyhow::Context;
use reqwest::blocking::Client;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

/// Source of raw page HTML.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> Result<String, ScrapeError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("unable to build http client")
            .map_err(ScrapeError::Fetch)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        fetch_html(&self.client, url).map_err(ScrapeError::Fetch)
    }
}

fn fetch_html(client: &Client, url: &Url) -> anyhow::Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .with_context(|| format!("request failed for {url}"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("non-success status for {url}"))?;
    response
        .text()
        .with_context(|| format!("unable to read response body for {url}"))
}
