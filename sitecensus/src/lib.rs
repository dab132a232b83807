// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{DEFAULT_REPORT_PATH, run_crawl, validate_limits};

// Re-export crawl functionality from sitecensus-core
pub use sitecensus_core::crawl::{
    CrawlOptions, execute_crawl, extract_url_path, generate_crawl_summary,
};
