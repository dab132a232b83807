pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod result;

pub use crawler::{Crawler, ProgressCallback};
pub use error::{CrawlError, FetchError};
pub use normalize::normalize_url;
pub use result::{CrawlOutcome, PageRecord};
