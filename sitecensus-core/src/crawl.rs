// Crawl orchestration between the engine and the terminal

use indicatif::{ProgressBar, ProgressStyle};
use sitecensus_crawler::error::Result;
use sitecensus_crawler::{CrawlOutcome, Crawler, ProgressCallback, normalize_url};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Options for configuring a crawl run
pub struct CrawlOptions {
    pub seed_url: String,
    pub max_concurrency: usize,
    pub max_pages: usize,
    pub show_progress_bar: bool,
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() { "/".to_string() } else { path }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options, wiring the engine's progress
/// callback into a terminal spinner when one is requested.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlOutcome> {
    let CrawlOptions {
        seed_url,
        max_concurrency,
        max_pages,
        show_progress_bar,
    } = options;

    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let fetched_count = Arc::new(AtomicUsize::new(0));

    let progress_callback: ProgressCallback = if let Some(ref pb) = progress_bar {
        let pb = pb.clone();
        let count = Arc::clone(&fetched_count);
        Arc::new(move |url: String| {
            let fetched = count.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_message(format!(
                "Crawling {} ({} pages)",
                extract_url_path(&url),
                fetched
            ));
            pb.tick();
        })
    } else {
        Arc::new(|_url: String| {})
    };

    let crawler = Crawler::new().with_progress_callback(progress_callback);
    let outcome = match crawler.crawl(&seed_url, max_concurrency, max_pages).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            return Err(e);
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete, {} pages fetched",
            fetched_count.load(Ordering::Relaxed)
        ));
    }

    Ok(outcome)
}

/// Generate a human-readable summary of a crawl outcome
pub fn generate_crawl_summary(outcome: &CrawlOutcome) -> String {
    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages fetched: {}\n", outcome.pages.len()));
    report.push_str(&format!(
        "  URLs discovered: {}\n",
        outcome.visit_counts.len()
    ));

    let total_links: usize = outcome
        .pages
        .values()
        .map(|p| p.outgoing_links.len())
        .sum();
    report.push_str(&format!("  Links found: {}\n", total_links));

    let total_images: usize = outcome.pages.values().map(|p| p.image_urls.len()).sum();
    report.push_str(&format!("  Images found: {}\n", total_images));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("# Pages:\n");
    let fetched: HashSet<String> = outcome
        .pages
        .keys()
        .filter_map(|url| normalize_url(url).ok())
        .collect();
    let mut entries: Vec<(&String, &usize)> = outcome.visit_counts.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (key, count) in entries {
        let status = if fetched.contains(key) {
            "fetched"
        } else {
            "not fetched"
        };
        report.push_str(&format!("  {} (seen {}x, {})\n", key, count, status));
    }

    report
}
