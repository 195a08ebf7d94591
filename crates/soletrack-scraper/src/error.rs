use thiserror::Error;

/// Failures that escape the extraction pipeline.
///
/// Only transport-level problems are fatal: malformed embedded data and
/// unmatched heuristics are absorbed into documented defaults inside the
/// pipeline and never surface here.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error fetching product page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
