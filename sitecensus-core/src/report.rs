// CSV census report generation

use csv::WriterBuilder;
use sitecensus_crawler::PageRecord;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Column order of the census CSV.
pub const CSV_HEADER: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the accumulated page data as a CSV report. List-valued fields are
/// semicolon-joined before CSV quoting applies; rows are sorted by page URL
/// so repeated runs produce comparable files.
pub fn write_csv_report(
    pages: &HashMap<String, PageRecord>,
    path: &Path,
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(CSV_HEADER)?;

    let mut records: Vec<&PageRecord> = pages.values().collect();
    records.sort_by(|a, b| a.url.cmp(&b.url));

    for page in records {
        let outgoing = page.outgoing_links.join(";");
        let images = page.image_urls.join(";");
        writer.write_record([
            page.url.as_str(),
            page.h1.as_str(),
            page.first_paragraph.as_str(),
            outgoing.as_str(),
            images.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
