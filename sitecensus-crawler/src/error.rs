use thiserror::Error;

/// Errors that abort a whole crawl run.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

/// Failure modes of a single page fetch. These stay local to one unit of
/// work; the rest of the crawl keeps going.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("unsupported content type '{0}', expected text/html")]
    UnsupportedContentType(String),

    #[error("fetch cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, CrawlError>;
