// src/inventory.rs
// =============================================================================
// Reads the list of URLs to audit from a delimited file.
//
// Format:
// - No header row
// - One URL per row, in the first column (other columns are ignored,
//   so a spreadsheet export with extra columns works as-is)
// - Surrounding whitespace is trimmed; blank rows and blank cells are skipped
//
// Nothing else is validated. A malformed URL is still submitted and simply
// shows up as a failed probe in the report.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Reads URLs from a CSV file on disk
//
// Parameters:
//   path: path to the inventory file
//
// Returns: URLs in file order, blanks removed
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open URL inventory {}", path.display()))?;

    parse_urls(file).with_context(|| format!("Failed to read URL inventory {}", path.display()))
}

// Same as read_urls, but from any reader (handy for stdin and tests)
pub fn parse_urls<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // rows may have different column counts
        .from_reader(reader);

    let mut urls = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed row {}", index + 1))?;

        if let Some(first) = record.get(0) {
            let url = first.trim();
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }

    Ok(urls)
}
