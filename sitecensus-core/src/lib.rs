pub mod crawl;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl, extract_url_path, generate_crawl_summary};
pub use report::{CSV_HEADER, ReportError, write_csv_report};
