// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = all good, 1 = dead links found, 2 = error)
// =============================================================================

mod analytics;  // src/analytics/ - Search Console query
mod checker;    // src/checker/ - probing, worker pool, aggregation
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - pool size / timeout
mod inventory;  // src/inventory.rs - reading URL lists
mod logging;    // src/logging.rs - env_logger setup
mod report;     // src/report.rs - CSV, table, JSON output

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::Path;

use analytics::SearchAnalyticsQuery;
use cli::{Cli, Commands};
use config::ProbeConfig;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every URL answered and none was a 404
//   Ok(1) = at least one 404 or failed probe
//   Err   = bad input, bad config, I/O failure (mapped to exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // A logger that is already installed is not worth aborting over
    if let Err(e) = logging::init_logger(cli.log_level.map(LevelFilter::from)) {
        eprintln!("Warning: {:#}", e);
    }

    match cli.command {
        Commands::Check {
            input,
            output,
            pool_size,
            timeout,
            json,
            sort,
        } => {
            let config = ProbeConfig::new(pool_size, timeout)?;
            handle_check(&input, output.as_deref(), &config, json, sort).await
        }
        Commands::Analytics {
            site,
            start,
            end,
            token,
            endpoint,
            json,
        } => {
            let query = SearchAnalyticsQuery {
                site_url: site,
                start_date: start,
                end_date: end,
            };
            handle_analytics(&query, &token, &endpoint, json).await
        }
    }
}

// Handles the 'check' subcommand
async fn handle_check(
    input: &Path,
    output: Option<&Path>,
    config: &ProbeConfig,
    json: bool,
    sort: bool,
) -> Result<i32> {
    let urls = inventory::read_urls(input)?;
    info!("Read {} URL(s) from {}", urls.len(), input.display());

    if urls.is_empty() {
        if !json {
            println!("⚠️  No URLs found in {}", input.display());
        }
        return Ok(0);
    }

    if !json {
        println!(
            "🌐 Checking {} URL(s) with {} worker(s)...\n",
            urls.len(),
            config.pool_size
        );
    }

    let mut results = checker::probe_all(urls, config).await?;

    if sort {
        report::sort_by_url(&mut results);
    }

    if let Some(path) = output {
        report::write_csv(path, &results)?;
        info!("Wrote {} result(s) to {}", results.len(), path.display());
    }

    let summary = report::Summary::from_results(&results);
    if json {
        report::print_json(&results)?;
    } else {
        report::print_table(&results);
        summary.print();
        if let Some(path) = output {
            println!("\n📄 Results written to {}", path.display());
        }
    }

    Ok(if summary.has_problems() { 1 } else { 0 })
}

// Handles the 'analytics' subcommand
async fn handle_analytics(
    query: &SearchAnalyticsQuery,
    token: &str,
    endpoint: &str,
    json: bool,
) -> Result<i32> {
    let client = reqwest::Client::builder()
        .user_agent(checker::USER_AGENT)
        .build()
        .context("Failed to create HTTP client")?;

    let response = analytics::fetch_search_analytics(&client, endpoint, token, query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(0);
    }

    if response.rows.is_empty() {
        println!("No search analytics rows for {}", query.site_url);
    }

    for row in &response.rows {
        println!(
            "Page: {}, Impressions: {}, Clicks: {}",
            row.page().unwrap_or("(none)"),
            row.impressions,
            row.clicks
        );
    }

    Ok(0)
}
