use crate::error::FetchError;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fetch one page body as text. The request is raced against `cancel` at
/// both suspension points (sending and reading the body), so a stopped
/// crawl never waits out a slow server.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    cancel: &CancellationToken,
) -> Result<String, FetchError> {
    debug!("Fetching {}", url);

    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        result = client.get(url).send() => result?,
    };

    let status = response.status().as_u16();
    if status >= 400 {
        return Err(FetchError::HttpStatus(status));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let is_html = content_type
        .as_deref()
        .map(|ct| ct.contains("text/html"))
        .unwrap_or(false);
    if !is_html {
        return Err(FetchError::UnsupportedContentType(
            content_type.unwrap_or_default(),
        ));
    }

    let body = tokio::select! {
        _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        result = response.text() => result?,
    };

    Ok(body)
}
