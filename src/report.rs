// src/report.rs
// =============================================================================
// Everything that turns probe results into output.
//
// - CSV file with the fixed columns: URL, Is 404, Status Code,
//   Response Time, Error
// - A human-readable table for the terminal
// - Pretty JSON (for piping into jq or other tools)
// - A summary with counts, used for the final exit code too
//
// Results arrive in completion order. sort_by_url() gives a stable order
// for callers that want one.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::checker::ProbeResult;

/// Column headers of the CSV report, in output order
pub const CSV_HEADER: [&str; 5] = ["URL", "Is 404", "Status Code", "Response Time", "Error"];

const URL_COLUMN_WIDTH: usize = 60;

/// Counts over a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Server answered with something other than 404
    pub ok: usize,
    /// Server answered 404
    pub not_found: usize,
    /// No answer, or the client reported an error
    pub failed: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Summary::default()
        };

        for result in results {
            if result.is_failed() {
                summary.failed += 1;
            } else if result.is_ok() {
                summary.ok += 1;
            } else {
                summary.not_found += 1;
            }
        }

        summary
    }

    /// True if anything was a 404 or failed outright
    pub fn has_problems(&self) -> bool {
        self.not_found > 0 || self.failed > 0
    }

    pub fn print(&self) {
        println!("📊 Summary:");
        println!("   ✅ OK: {}", self.ok);
        println!("   ❌ Not found (404): {}", self.not_found);
        println!("   ⚠️  Failed: {}", self.failed);
        println!("   📋 Total: {}", self.total);
    }
}

// Sorts results by URL so reruns produce comparable files
pub fn sort_by_url(results: &mut [ProbeResult]) {
    results.sort_by(|a, b| a.url().cmp(b.url()));
}

// Writes the CSV report to a file, replacing it if it exists
pub fn write_csv(path: &Path, results: &[ProbeResult]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;

    write_csv_to(file, results).with_context(|| format!("Failed to write report {}", path.display()))
}

// Writes the CSV report to any writer
pub fn write_csv_to<W: Write>(writer: W, results: &[ProbeResult]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for result in results {
        csv_writer.write_record(csv_row(result))?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn csv_row(result: &ProbeResult) -> [String; 5] {
    [
        result.url().to_string(),
        result.is_not_found().to_string(),
        result
            .status_code()
            .map(|code| code.to_string())
            .unwrap_or_default(),
        format!("{:.3}", result.response_time_secs()),
        result.error_message().to_string(),
    ]
}

// Prints results as pretty JSON
pub fn print_json(results: &[ProbeResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    println!("{}", json_output);
    Ok(())
}

// Prints results as a human-readable table in the terminal
pub fn print_table(results: &[ProbeResult]) {
    println!(
        "{:<width$} {:<8} {:<10} {}",
        "URL",
        "STATUS",
        "TIME (s)",
        "ERROR",
        width = URL_COLUMN_WIDTH
    );
    println!("{}", "=".repeat(URL_COLUMN_WIDTH + 40));

    for result in results {
        let status = match result.status_code() {
            Some(code) => code.to_string(),
            None => "-".to_string(),
        };

        println!(
            "{:<width$} {:<8} {:<10.3} {}",
            truncate(result.url(), URL_COLUMN_WIDTH - 3),
            status,
            result.response_time_secs(),
            result.error_message(),
            width = URL_COLUMN_WIDTH
        );
    }

    println!();
}

// Shortens long URLs for display; counts chars so multi-byte text can't split
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::ProbeOutcome;
    use std::time::Duration;

    fn sample_results() -> Vec<ProbeResult> {
        vec![
            ProbeResult::new(
                "https://b.example/ok".to_string(),
                ProbeOutcome::Success { status: 200 },
                Duration::from_millis(120),
            ),
            ProbeResult::new(
                "https://a.example/missing".to_string(),
                ProbeOutcome::Success { status: 404 },
                Duration::from_millis(45),
            ),
            ProbeResult::new(
                "https://c.example/down".to_string(),
                ProbeOutcome::TransportError {
                    message: "connect: connection refused".to_string(),
                },
                Duration::from_secs(2),
            ),
        ]
    }

    #[test]
    fn test_csv_layout() {
        let mut buffer = Vec::new();
        write_csv_to(&mut buffer, &sample_results()).expect("should write");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "URL,Is 404,Status Code,Response Time,Error");
        assert_eq!(lines[1], "https://b.example/ok,false,200,0.120,");
        assert_eq!(lines[2], "https://a.example/missing,true,404,0.045,");
        assert_eq!(
            lines[3],
            "https://c.example/down,false,,2.000,connect: connection refused"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_quotes_errors_with_commas() {
        let results = vec![ProbeResult::new(
            "https://x.example".to_string(),
            ProbeOutcome::TransportError {
                message: "timeout: a, b".to_string(),
            },
            Duration::from_millis(1),
        )];

        let mut buffer = Vec::new();
        write_csv_to(&mut buffer, &results).expect("should write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("\"timeout: a, b\""));
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");

        write_csv(&path, &sample_results()).expect("should write");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("URL,Is 404,Status Code,Response Time,Error"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_summary_counts() {
        let summary = Summary::from_results(&sample_results());
        assert_eq!(
            summary,
            Summary {
                ok: 1,
                not_found: 1,
                failed: 1,
                total: 3
            }
        );
        assert!(summary.has_problems());

        let clean = Summary::from_results(&sample_results()[..1]);
        assert!(!clean.has_problems());
    }

    #[test]
    fn test_summary_counts_404_with_error_as_failed() {
        let results = vec![ProbeResult::new(
            "https://a.example/old".to_string(),
            ProbeOutcome::ProtocolError {
                status: 404,
                message: "http status: 404 Not Found".to_string(),
            },
            Duration::from_millis(3),
        )];

        let summary = Summary::from_results(&results);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.not_found, 0);
        assert_eq!(summary.ok, 0);
    }

    #[test]
    fn test_sort_by_url() {
        let mut results = sample_results();
        sort_by_url(&mut results);
        let urls: Vec<&str> = results.iter().map(|r| r.url()).collect();
        assert_eq!(
            urls,
            vec![
                "https://a.example/missing",
                "https://b.example/ok",
                "https://c.example/down"
            ]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn test_json_fields() {
        let value = serde_json::to_value(&sample_results()[1]).expect("serialize");
        assert_eq!(value["url"], "https://a.example/missing");
        assert_eq!(value["status_code"], 404);
        assert_eq!(value["is_not_found"], true);
        assert_eq!(value["error_message"], "");
    }
}
