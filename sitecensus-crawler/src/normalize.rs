use crate::error::{CrawlError, Result};
use url::Url;

/// Reduce a URL to its dedup key: host plus path, with a single trailing
/// slash stripped. Scheme, port, query, and fragment never distinguish two
/// crawl targets, and hosts compare case-insensitively (the parser already
/// lowercases them). Path case is preserved.
pub fn normalize_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", raw, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| CrawlError::InvalidUrl(format!("URL has no host: {}", raw)))?;

    let mut key = format!("{}{}", host, parsed.path());
    if key.ends_with('/') {
        key.pop();
    }
    Ok(key)
}
