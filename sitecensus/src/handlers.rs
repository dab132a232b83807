use clap::ArgMatches;
use colored::Colorize;
use sitecensus_core::crawl::{CrawlOptions, execute_crawl, generate_crawl_summary};
use sitecensus_core::report::write_csv_report;
use sitecensus_crawler::CrawlOutcome;
use std::path::Path;
use url::Url;

/// Where the census lands unless told otherwise.
pub const DEFAULT_REPORT_PATH: &str = "report.csv";

/// Reject zero limits before any crawling starts.
pub fn validate_limits(max_concurrency: usize, max_pages: usize) -> Result<(), String> {
    if max_concurrency == 0 {
        return Err("invalid maxConcurrency: must be a positive integer".to_string());
    }
    if max_pages == 0 {
        return Err("invalid maxPages: must be a positive integer".to_string());
    }
    Ok(())
}

pub async fn handle_run(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let base_url = sub_matches.get_one::<Url>("BASE_URL").unwrap();
    let max_concurrency = *sub_matches.get_one::<usize>("MAX_CONCURRENCY").unwrap();
    let max_pages = *sub_matches.get_one::<usize>("MAX_PAGES").unwrap();

    if let Err(e) = validate_limits(max_concurrency, max_pages) {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }

    println!("\n🕷️  Crawling {}", base_url);
    println!("Concurrency: {}", max_concurrency);
    println!("Max pages: {}\n", max_pages);

    let options = CrawlOptions {
        seed_url: base_url.to_string(),
        max_concurrency,
        max_pages,
        show_progress_bar: true,
    };

    match run_crawl(options, Path::new(DEFAULT_REPORT_PATH)).await {
        Ok(outcome) => {
            println!("\n{} Crawl complete!\n", "✓".green().bold());
            print!("{}", generate_crawl_summary(&outcome));
            println!(
                "\n{} Report written to {}",
                "✓".green().bold(),
                DEFAULT_REPORT_PATH
            );
        }
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Crawl, then persist the census. Split from the handler so the whole
/// pipeline returns errors instead of exiting.
pub async fn run_crawl(options: CrawlOptions, report_path: &Path) -> anyhow::Result<CrawlOutcome> {
    let outcome = execute_crawl(options).await?;
    write_csv_report(&outcome.pages, report_path)?;
    Ok(outcome)
}
