use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Failed to fetch the event page: {0:#}")]
    Fetch(anyhow::Error),
}

/// Raised by a family extractor when a value has the expected shape but
/// cannot be parsed. The dispatcher recovers from it with the generic pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("could not parse {field} from {input:?}")]
    DateParse { field: &'static str, input: String },
}
