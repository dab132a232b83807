use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured data pulled from one fetched page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub h1: String,
    pub first_paragraph: String,
    pub outgoing_links: Vec<String>,
    pub image_urls: Vec<String>,
}

impl PageRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            h1: String::new(),
            first_paragraph: String::new(),
            outgoing_links: Vec::new(),
            image_urls: Vec::new(),
        }
    }
}

/// Final result of a crawl run, frozen once every spawned unit of work has
/// completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// Discovery counts keyed by normalized URL. A key's count is bumped on
    /// every in-scope discovery; the page behind it is fetched at most once.
    pub visit_counts: HashMap<String, usize>,
    /// Extracted page data keyed by the URL that was actually fetched. Only
    /// successful fetches produce an entry.
    pub pages: HashMap<String, PageRecord>,
}
