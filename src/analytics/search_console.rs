// src/analytics/search_console.rs
// =============================================================================
// Search Console search analytics query.
//
// Request:
//   POST {base}/webmasters/v3/sites/{site}/searchAnalytics/query
//   Authorization: Bearer <token>
//   {"startDate": "...", "endDate": "...", "dimensions": ["page"], "rowLimit": 5000}
//
// The site URL goes into the path as a single segment, so its slashes,
// spaces and percent signs are percent-encoded
// ("https://example.com/" -> "https:%2F%2Fexample.com%2F").
//
// Rust concepts:
// - serde rename_all: map Rust snake_case fields to the API's camelCase
// - #[serde(default)]: tolerate fields the API leaves out
// =============================================================================

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Production API host
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// Maximum rows the API returns per request
const ROW_LIMIT: u32 = 5000;

/// What to ask for: one verified property over an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAnalyticsQuery {
    /// Property URL exactly as verified in Search Console
    pub site_url: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// JSON body sent to the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody {
    start_date: String,
    end_date: String,
    dimensions: Vec<&'static str>,
    row_limit: u32,
}

impl From<&SearchAnalyticsQuery> for QueryBody {
    fn from(query: &SearchAnalyticsQuery) -> Self {
        QueryBody {
            // NaiveDate displays as YYYY-MM-DD, which is what the API wants
            start_date: query.start_date.to_string(),
            end_date: query.end_date.to_string(),
            dimensions: vec!["page"],
            row_limit: ROW_LIMIT,
        }
    }
}

/// Response body. `rows` is absent when there is no data for the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsResponse {
    #[serde(default)]
    pub rows: Vec<SearchAnalyticsRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_aggregation_type: Option<String>,
}

/// One row, keyed by the requested dimensions (here: just the page)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalyticsRow {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub position: f64,
}

impl SearchAnalyticsRow {
    /// The page URL (first key), if the API returned one
    pub fn page(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }
}

// Builds the query endpoint for a site
//
// path_segments_mut() encodes each segment for a path, not a form:
// a space becomes %20 and '+' is left alone.
fn query_endpoint(api_base: &str, site_url: &str) -> Result<Url> {
    let mut endpoint =
        Url::parse(api_base).with_context(|| format!("Invalid API base URL: {}", api_base))?;

    endpoint
        .path_segments_mut()
        .map_err(|_| anyhow!("API base URL cannot have a path: {}", api_base))?
        .pop_if_empty()
        .extend(["webmasters", "v3", "sites", site_url, "searchAnalytics", "query"]);

    Ok(endpoint)
}

// Runs one search analytics query
//
// Parameters:
//   client: reqwest client to send with
//   api_base: API host, normally DEFAULT_API_BASE
//   access_token: OAuth access token with Search Console scope
//   query: site and date range
//
// Returns: the parsed response, or an error for network failures,
// non-2xx answers (with the response body in the message) and bad JSON
pub async fn fetch_search_analytics(
    client: &Client,
    api_base: &str,
    access_token: &str,
    query: &SearchAnalyticsQuery,
) -> Result<SearchAnalyticsResponse> {
    if query.end_date < query.start_date {
        bail!(
            "End date {} is before start date {}",
            query.end_date,
            query.start_date
        );
    }

    let endpoint = query_endpoint(api_base, &query.site_url)?;
    log::debug!("Querying search analytics at {}", endpoint);

    let response = client
        .post(endpoint.clone())
        .bearer_auth(access_token)
        .json(&QueryBody::from(query))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", endpoint))?;

    let status = response.status();
    if !status.is_success() {
        // The API explains what went wrong in the body, keep it
        let body = response.text().await.unwrap_or_default();
        bail!(
            "Search analytics request failed with HTTP {}: {}",
            status.as_u16(),
            body.trim()
        );
    }

    response
        .json::<SearchAnalyticsResponse>()
        .await
        .context("Failed to decode search analytics response")
}
