// Tests for CLI handlers

use sitecensus::CrawlOptions;
use sitecensus::handlers::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Argument Validation Tests
// ============================================================================

#[test]
fn test_validate_limits_accepts_positive_values() {
    assert!(validate_limits(1, 1).is_ok());
    assert!(validate_limits(8, 200).is_ok());
}

#[test]
fn test_validate_limits_rejects_zero_concurrency() {
    let result = validate_limits(0, 10);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid maxConcurrency"));
}

#[test]
fn test_validate_limits_rejects_zero_pages() {
    let result = validate_limits(10, 0);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid maxPages"));
}

#[test]
fn test_default_report_path() {
    assert_eq!(DEFAULT_REPORT_PATH, "report.csv");
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_run_crawl_writes_census_csv() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(
                    br#"<html><body>
                        <h1>Home</h1>
                        <main><p>Welcome.</p></main>
                        <a href="/about">about</a>
                    </body></html>"#
                        .to_vec(),
                ),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(b"<html><body><h1>About</h1></body></html>".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.csv");

    let options = CrawlOptions {
        seed_url: mock_server.uri(),
        max_concurrency: 2,
        max_pages: 10,
        show_progress_bar: false,
    };

    let outcome = run_crawl(options, &report_path).await.unwrap();
    assert_eq!(outcome.pages.len(), 2);

    let raw = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(
        lines[0],
        "page_url,h1,first_paragraph,outgoing_link_urls,image_urls"
    );
    assert_eq!(lines.len(), 3);
    assert!(raw.contains("Home"));
    assert!(raw.contains("Welcome."));
    assert!(raw.contains("About"));
}

#[tokio::test]
async fn test_run_crawl_propagates_invalid_seed() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.csv");

    let options = CrawlOptions {
        seed_url: "not a url".to_string(),
        max_concurrency: 2,
        max_pages: 10,
        show_progress_bar: false,
    };

    let result = run_crawl(options, &report_path).await;
    assert!(result.is_err());
    assert!(!report_path.exists(), "no report should be written on failure");
}
