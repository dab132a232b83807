use crate::error::{CrawlError, FetchError, Result};
use crate::extract;
use crate::fetch::fetch_page;
use crate::normalize::normalize_url;
use crate::result::{CrawlOutcome, PageRecord};
use futures::future::join_all;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Callback invoked with each URL admitted for fetching.
pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Concurrent crawler for a single website.
///
/// Starting from a seed URL, follows links to every reachable page on the
/// seed's host, fetching each distinct page at most once, with a hard cap on
/// the number of pages fetched and on how many fetches run at the same time.
pub struct Crawler {
    client: Client,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(format!("sitecensus/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs / 2))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .http2_adaptive_window(true)
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl every page reachable from `seed_url` on the seed's host, with
    /// at most `max_concurrency` fetches in flight and at most `max_pages`
    /// distinct pages fetched. Both limits are clamped to a minimum of 1.
    ///
    /// Returns only after every spawned unit of work has completed, so the
    /// outcome is final.
    pub async fn crawl(
        &self,
        seed_url: &str,
        max_concurrency: usize,
        max_pages: usize,
    ) -> Result<CrawlOutcome> {
        let max_concurrency = max_concurrency.max(1);
        let max_pages = max_pages.max(1);

        info!(
            "Starting crawl of {} (concurrency={}, max_pages={})",
            seed_url, max_concurrency, max_pages
        );

        let base_url = Url::parse(seed_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("Invalid URL: {}", e)))?;
        let scope_host = base_url
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(format!("URL has no host: {}", seed_url)))?
            .to_string();

        let run = Arc::new(CrawlRun {
            client: self.client.clone(),
            base_url,
            scope_host,
            max_pages,
            state: StdMutex::new(RunState::default()),
            pages: StdMutex::new(HashMap::new()),
            fetch_slots: Semaphore::new(max_concurrency),
            cancel: CancellationToken::new(),
            progress_callback: self.progress_callback.clone(),
        });

        // The root unit of work completes only after its whole subtree has.
        let root = tokio::spawn(Arc::clone(&run).visit(seed_url.to_string()));
        root.await?;

        let outcome = {
            let state = run.state.lock().unwrap();
            let pages = run.pages.lock().unwrap();
            CrawlOutcome {
                visit_counts: state.visit_counts.clone(),
                pages: pages.clone(),
            }
        };

        info!(
            "Crawl complete: {} pages fetched, {} URLs discovered",
            outcome.pages.len(),
            outcome.visit_counts.len()
        );

        Ok(outcome)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct RunState {
    visited: HashSet<String>,
    visit_counts: HashMap<String, usize>,
    stopped: bool,
}

/// State shared by every unit of work in one crawl run.
struct CrawlRun {
    client: Client,
    base_url: Url,
    scope_host: String,
    max_pages: usize,
    state: StdMutex<RunState>,
    pages: StdMutex<HashMap<String, PageRecord>>,
    fetch_slots: Semaphore,
    cancel: CancellationToken,
    progress_callback: Option<ProgressCallback>,
}

impl CrawlRun {
    /// Boxed wrapper so `visit_inner` can spawn its own type recursively.
    fn visit(self: Arc<Self>, url: String) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move { self.visit_inner(url).await })
    }

    async fn visit_inner(self: Arc<Self>, url: String) {
        // A stopped run spawns no new work, not even URL parsing.
        if self.cancel.is_cancelled() {
            return;
        }

        let Ok(parsed) = Url::parse(&url) else {
            debug!("Skipping unparseable URL: {}", url);
            return;
        };

        // Off-host links are dropped before they touch any shared state.
        let on_host = parsed
            .host_str()
            .map(|host| host.eq_ignore_ascii_case(&self.scope_host))
            .unwrap_or(false);
        if !on_host {
            debug!("Skipping off-host URL: {}", url);
            return;
        }

        let Ok(key) = normalize_url(&url) else {
            debug!("Skipping unnormalizable URL: {}", url);
            return;
        };

        if !self.admit(&key) {
            return;
        }

        if let Some(ref callback) = self.progress_callback {
            callback(url.clone());
        }

        // The permit gates fetch execution only. Units waiting here bail out
        // as soon as the run is cancelled; cancellation wins when both
        // branches are ready.
        let permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return,
            permit = self.fetch_slots.acquire() => match permit {
                Ok(permit) => permit,
                Err(_) => return,
            },
        };

        let html = match fetch_page(&self.client, &url, &self.cancel).await {
            Ok(html) => html,
            Err(FetchError::Cancelled) => {
                debug!("Fetch of {} cancelled", url);
                return;
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return;
            }
        };
        drop(permit);

        // Recursion resolves hrefs against the seed, the census record
        // against the page itself.
        let links = extract::extract_links(&html, &self.base_url);
        let record = extract::extract_page_data(&html, &url);
        self.pages.lock().unwrap().insert(url.clone(), record);

        // Fan out one child per discovered link and drain them all before
        // this unit completes.
        let children: Vec<_> = links
            .into_iter()
            .map(|link| tokio::spawn(Arc::clone(&self).visit(link)))
            .collect();

        for joined in join_all(children).await {
            if let Err(e) = joined {
                warn!("Crawl task failed: {}", e);
            }
        }
    }

    /// Admission gate. One critical section covers the discovery count, the
    /// duplicate check, the budget check, and the visited insert, so racing
    /// discoveries of the same URL admit exactly one fetch.
    fn admit(&self, key: &str) -> bool {
        let mut state = self.state.lock().unwrap();

        if state.stopped {
            return false;
        }

        *state.visit_counts.entry(key.to_string()).or_insert(0) += 1;

        if state.visited.contains(key) {
            debug!("Already visited {}", key);
            return false;
        }

        if state.visited.len() >= self.max_pages {
            state.stopped = true;
            self.cancel.cancel();
            info!("Page budget reached, stopping crawl");
            return false;
        }

        state.visited.insert(key.to_string());
        true
    }
}
