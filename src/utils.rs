use url::Url;

use crate::error::ScrapeError;

/// Parses the page URL a run starts from. Only absolute http(s) URLs with a
/// host are accepted.
pub fn parse_event_url(input: &str) -> Result<Url, ScrapeError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| ScrapeError::InvalidUrl(format!("{trimmed}: {err}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ScrapeError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme {other}"
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ScrapeError::InvalidUrl(format!("{trimmed}: missing host")));
    }
    Ok(url)
}

pub fn host_of(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_lowercase()
}

/// `scheme://host[:port]` of the page.
pub fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}
