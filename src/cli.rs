// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - check:     probe every URL in an inventory file and report the results
// - analytics: pull page-level impressions/clicks from Search Console
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - ValueEnum: lets an enum be used as a command-line value (--log-level)
// =============================================================================

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::analytics::DEFAULT_API_BASE;
use crate::config::{DEFAULT_POOL_SIZE, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "link-audit",
    version,
    about = "Audit URL inventories for dead links and 404s",
    long_about = "link-audit sends a HEAD request to every URL in a list, a bounded number at a time, \
                  and reports which ones answered, which are 404 and which failed."
)]
pub struct Cli {
    /// Log verbosity for link-audit itself; overrides RUST_LOG for this crate
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe every URL in a CSV file (first column, one URL per row)
    ///
    /// Example: link-audit check input_urls.csv -o results.csv --pool-size 20
    Check {
        /// CSV file with one URL per row
        input: PathBuf,

        /// Write results as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of requests in flight at once
        #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Per-request timeout in seconds (fractions allowed)
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: f64,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Sort results by URL instead of completion order
        #[arg(long)]
        sort: bool,
    },

    /// Fetch page impressions and clicks from the Search Console API
    ///
    /// Example: link-audit analytics --site https://example.com/ --start 2024-01-01 --end 2024-01-31
    Analytics {
        /// Property URL as verified in Search Console
        #[arg(long)]
        site: String,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// OAuth access token
        #[arg(long, env = "SEARCH_CONSOLE_TOKEN", hide_env_values = true)]
        token: String,

        /// API host to send the query to
        #[arg(long, default_value = DEFAULT_API_BASE)]
        endpoint: String,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["link-audit", "check", "urls.csv"]).expect("should parse");
        assert_eq!(cli.log_level, None);

        match cli.command {
            Commands::Check {
                input,
                output,
                pool_size,
                timeout,
                json,
                sort,
            } => {
                assert_eq!(input, PathBuf::from("urls.csv"));
                assert_eq!(output, None);
                assert_eq!(pool_size, 10);
                assert_eq!(timeout, 5.0);
                assert!(!json);
                assert!(!sort);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_overrides() {
        let cli = Cli::try_parse_from([
            "link-audit",
            "check",
            "urls.csv",
            "-o",
            "out.csv",
            "--pool-size",
            "25",
            "--timeout",
            "1.5",
            "--sort",
            "--log-level",
            "debug",
        ])
        .expect("should parse");

        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        match cli.command {
            Commands::Check {
                output,
                pool_size,
                timeout,
                sort,
                ..
            } => {
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(pool_size, 25);
                assert_eq!(timeout, 1.5);
                assert!(sort);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analytics_parses_dates() {
        let cli = Cli::try_parse_from([
            "link-audit",
            "analytics",
            "--site",
            "https://www.example.com/",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
            "--token",
            "abc",
        ])
        .expect("should parse");

        match cli.command {
            Commands::Analytics {
                site,
                start,
                end,
                token,
                endpoint,
                json,
            } => {
                assert_eq!(site, "https://www.example.com/");
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
                assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31).expect("date"));
                assert_eq!(token, "abc");
                assert_eq!(endpoint, DEFAULT_API_BASE);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analytics_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "link-audit",
            "analytics",
            "--site",
            "https://www.example.com/",
            "--start",
            "January",
            "--end",
            "2024-01-31",
            "--token",
            "abc",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
    }
}
