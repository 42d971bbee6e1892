// src/checker/probe.rs
// =============================================================================
// This module checks if a single URL is alive.
//
// Key functionality:
// - Makes one HTTP HEAD request (lightweight, no body download)
// - Times the attempt with a monotonic clock
// - Classifies what happened into exactly one of three outcomes:
//     Success         -> the server answered (any status code, 404 included)
//     ProtocolError   -> the client reported an error that still has a status
//     TransportError  -> no status at all (DNS, refused, TLS, timeout, ...)
//
// probe() never returns an error and never panics on network trouble.
// Every failure ends up as text in ProbeResult::error_message.
//
// Rust concepts:
// - Enums with data: ProbeOutcome carries the status and/or message
// - Option<u16>: a status code that may not exist
// - Error::source(): walking the chain of underlying errors
// =============================================================================

use reqwest::{redirect::Policy, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt::Write;
use std::time::{Duration, Instant};

/// User-Agent sent with every probe
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Same redirect budget as most browsers and urllib
const MAX_REDIRECTS: usize = 10;

// What happened when we probed a URL
//
// The three variants match the three ways a HEAD request can end.
// Status codes are plain u16 so the type stays serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The server responded (2xx, 3xx, 4xx and 5xx all land here)
    Success { status: u16 },
    /// The HTTP layer raised an error but a status code was available
    ProtocolError { status: u16, message: String },
    /// No HTTP status could be obtained
    TransportError { message: String },
}

impl ProbeOutcome {
    /// The HTTP status code, if the server got far enough to send one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status } | ProbeOutcome::ProtocolError { status, .. } => {
                Some(*status)
            }
            ProbeOutcome::TransportError { .. } => None,
        }
    }

    /// Error text, or "" for a plain success
    pub fn error_message(&self) -> &str {
        match self {
            ProbeOutcome::Success { .. } => "",
            ProbeOutcome::ProtocolError { message, .. }
            | ProbeOutcome::TransportError { message } => message,
        }
    }
}

// The result row for one probed URL
//
// Built only through ProbeResult::new(), which derives every field from a
// ProbeOutcome. That keeps is_not_found and status_code consistent.
// Fields are private so nothing can edit a result after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    url: String,
    status_code: Option<u16>,
    is_not_found: bool,
    response_time_secs: f64,
    error_message: String,
}

impl ProbeResult {
    /// Assembles a result from the URL, its outcome and how long the probe took
    pub fn new(url: String, outcome: ProbeOutcome, elapsed: Duration) -> Self {
        let status_code = outcome.status_code();
        let error_message = outcome.error_message().to_string();

        Self {
            url,
            status_code,
            is_not_found: status_code == Some(StatusCode::NOT_FOUND.as_u16()),
            response_time_secs: round_to_millis(elapsed.as_secs_f64()),
            error_message,
        }
    }

    /// The URL exactly as it was submitted
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// True only when the server answered 404
    pub fn is_not_found(&self) -> bool {
        self.is_not_found
    }

    /// Wall-clock seconds for the attempt, rounded to 3 decimals
    pub fn response_time_secs(&self) -> f64 {
        self.response_time_secs
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// No response, or the client reported an error
    pub fn is_failed(&self) -> bool {
        self.status_code.is_none() || !self.error_message.is_empty()
    }

    /// The server answered and it wasn't a 404
    pub fn is_ok(&self) -> bool {
        !self.is_failed() && !self.is_not_found
    }
}

// Creates the HTTP client shared by every probe in a batch
//
// The timeout set here is what bounds each individual probe.
// Client is cheap to clone (it's an Arc internally), so one is enough.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .user_agent(USER_AGENT)
        .build()
}

// Probes a single URL
//
// Parameters:
//   client: shared reqwest client (carries the timeout)
//   url: the URL to check, used as-is
//
// Returns: a ProbeResult, always. Never an error.
pub async fn probe(client: &Client, url: &str) -> ProbeResult {
    let start = Instant::now();

    // HEAD keeps this cheap: we only want the status line
    let outcome = match client.head(url).send().await {
        Ok(response) => ProbeOutcome::Success {
            status: response.status().as_u16(),
        },
        Err(e) => classify_error(&e),
    };

    ProbeResult::new(url.to_string(), outcome, start.elapsed())
}

// Turns a reqwest error into a ProbeOutcome
//
// reqwest only attaches a status to errors produced from a response
// (e.g. error_for_status()), so a status here means "protocol error".
// probe() never calls error_for_status(): a 404 or 500 from the server is
// a Success with an empty error. ProtocolError only shows up when the client
// itself hands back an error that carries a status.
pub(crate) fn classify_error(error: &reqwest::Error) -> ProbeOutcome {
    let message = describe_error(error);

    match error.status() {
        Some(status) => ProbeOutcome::ProtocolError {
            status: status.as_u16(),
            message,
        },
        None => ProbeOutcome::TransportError { message },
    }
}

// Renders an error and its causes on one line, prefixed with a short kind
//
// reqwest's own Display is often just "error sending request for url (...)";
// the useful part ("connection refused", "operation timed out") sits in the
// source chain.
fn describe_error(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_builder() {
        "invalid request"
    } else if error.is_status() {
        "http status"
    } else {
        "request"
    };

    let mut text = format!("{kind}: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // hyper and std often repeat the same message one level down
        if !text.contains(&cause_text) {
            let _ = write!(text, ": {cause_text}");
        }
        source = cause.source();
    }
    text
}

fn round_to_millis(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
