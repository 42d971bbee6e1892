// src/analytics/mod.rs
// =============================================================================
// This module talks to the Search Console "searchAnalytics/query" API.
//
// Use case: pull the list of pages Google has seen for a property, with
// impressions and clicks, so it can be compared against a URL audit.
//
// Currently implements:
// - One authenticated POST per call (Bearer token, JSON body)
// - Grouping by page, up to 5000 rows
//
// Getting a token is up to the caller (gcloud, a service account, ...).
// =============================================================================

mod search_console;

pub use search_console::{fetch_search_analytics, SearchAnalyticsQuery, DEFAULT_API_BASE};
