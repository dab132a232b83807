use crate::result::PageRecord;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Absolute URLs for every anchor on the page, resolved against `base`.
/// Hrefs that fail to resolve are skipped; they never fail the extraction.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    resolved_attrs(&document, "a[href]", "href", base)
}

/// Absolute URLs for every image source on the page.
pub fn extract_image_urls(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    resolved_attrs(&document, "img[src]", "src", base)
}

/// Text of the first `<h1>`, trimmed. Empty when the page has none.
pub fn extract_h1(html: &str) -> String {
    let document = Html::parse_document(html);
    first_h1(&document)
}

/// Text of the first paragraph, preferring one inside `<main>` over the
/// first paragraph anywhere. Empty when the page has none.
pub fn extract_first_paragraph(html: &str) -> String {
    let document = Html::parse_document(html);
    first_paragraph(&document)
}

/// Build the census record for one fetched page. Field-level failures
/// degrade to empty values; extraction itself never fails.
pub fn extract_page_data(html: &str, page_url: &str) -> PageRecord {
    let document = Html::parse_document(html);
    let mut record = PageRecord::new(page_url.to_string());

    record.h1 = first_h1(&document);
    record.first_paragraph = first_paragraph(&document);
    if let Ok(base) = Url::parse(page_url) {
        record.outgoing_links = resolved_attrs(&document, "a[href]", "href", &base);
        record.image_urls = resolved_attrs(&document, "img[src]", "src", &base);
    }

    record
}

fn first_h1(document: &Html) -> String {
    let selector = Selector::parse("h1").unwrap();
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn first_paragraph(document: &Html) -> String {
    let scoped = Selector::parse("main p").unwrap();
    let anywhere = Selector::parse("p").unwrap();
    document
        .select(&scoped)
        .next()
        .or_else(|| document.select(&anywhere).next())
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn resolved_attrs(document: &Html, selector: &str, attr: &str, base: &Url) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    let mut urls = Vec::new();

    for element in document.select(&selector) {
        if let Some(value) = element.value().attr(attr)
            && !value.is_empty()
        {
            match base.join(value) {
                Ok(resolved) => urls.push(resolved.to_string()),
                Err(e) => debug!("Skipping unresolvable {} '{}': {}", attr, value, e),
            }
        }
    }

    urls
}
