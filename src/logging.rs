// src/logging.rs
// =============================================================================
// Sets up the `log` facade with env_logger as the backend.
//
// Filters are applied in this order, later ones winning for the same module:
// 1. Built-in defaults: everything at warn, reqwest/hyper capped at warn
// 2. RUST_LOG (so RUST_LOG=link_audit=debug or RUST_LOG=reqwest=debug work)
// 3. --log-level, only when given on the command line, for our own crate
//
// Logs go to stderr. The table, JSON and summary go to stdout, so
// `link-audit check urls.csv --json | jq` still works with logging on.
// =============================================================================

use anyhow::{Context, Result};
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

const CRATE_TARGET: &str = "link_audit";

// Installs the global logger. Calling it twice returns an error instead of
// panicking, which keeps tests that touch logging independent.
pub fn init_logger(level: Option<LevelFilter>) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();

    build_logger(rust_log.as_deref(), level)
        .try_init()
        .context("Failed to initialize logger")
}

// Builds the logger without installing it
//
// Parameters:
//   rust_log: contents of RUST_LOG, if set
//   level: --log-level, if given
pub fn build_logger(rust_log: Option<&str>, level: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::new();

    builder.filter_level(LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);

    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }

    if let Some(level) = level {
        builder.filter_module(CRATE_TARGET, level);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            buf.timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder
}
