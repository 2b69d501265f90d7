//! HTTP title discovery for swept endpoints.
//!
//! Runs strictly after the sweep phase: its input is the aggregated
//! sweep output. Every open (host, port) pair gets one bounded GET over
//! a single shared client; the fan-out is multiplexed on the runtime
//! rather than thread-per-request, since this phase is purely I/O-bound.

use crate::output::{self, ProgressMode};
use crate::scanner::HostReport;
use futures::stream::{self, StreamExt};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// First `<title>` element, case-insensitive, attribute-tolerant.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// What one endpoint fetch produced.
///
/// Failures are data: a dead endpoint or a garbage response becomes an
/// `Error` record, never a fault that crosses the fetcher boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TitleOutcome {
    /// Page title text from a 200 response.
    Title(String),
    /// Non-200 HTTP status code.
    Status(u16),
    /// Network or protocol failure description.
    Error(String),
}

impl fmt::Display for TitleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => write!(f, "{}", title),
            Self::Status(code) => write!(f, "Failed with status code: {}", code),
            Self::Error(reason) => write!(f, "Error: {}", reason),
        }
    }
}

/// Terminal result of fetching one endpoint. Only ever displayed or
/// serialized, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct TitleRecord {
    /// The endpoint URL that was fetched.
    pub url: String,
    /// What came back.
    pub outcome: TitleOutcome,
}

/// Fetches titles for all open endpoints over one shared client.
pub struct TitleFetcher {
    client: reqwest::Client,
    concurrency: usize,
    progress: ProgressMode,
}

impl TitleFetcher {
    /// Create a fetcher with the given per-request timeout and fan-out
    /// bound. Fails only if the HTTP client cannot be constructed.
    pub fn new(
        timeout: Duration,
        concurrency: usize,
        progress: ProgressMode,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trawl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
            progress,
        })
    }

    /// Fetch a title record for every open endpoint in `reports`.
    ///
    /// Hosts with empty port sets are skipped. Records are printed in
    /// completion order as they are produced and returned once all
    /// fetches resolve.
    pub async fn fetch_all(&self, reports: &[HostReport]) -> Vec<TitleRecord> {
        let endpoints: Vec<String> = reports
            .iter()
            .filter(|r| r.has_open_ports())
            .flat_map(|r| r.open_ports.iter().map(|&port| endpoint_url(r.addr, port)))
            .collect();

        debug!(endpoints = endpoints.len(), "starting title fetch");

        stream::iter(endpoints)
            .map(|url| async move {
                let record = self.fetch_one(url).await;
                if self.progress.announces() {
                    output::print_title_record(&record);
                }
                record
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_one(&self, url: String) -> TitleRecord {
        let outcome = match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                if status == reqwest::StatusCode::OK {
                    match response.text().await {
                        Ok(body) => TitleOutcome::Title(
                            extract_title(&body)
                                .unwrap_or_else(|| "No title found".to_string()),
                        ),
                        Err(e) => TitleOutcome::Error(e.to_string()),
                    }
                } else {
                    TitleOutcome::Status(status.as_u16())
                }
            }
            Err(e) => TitleOutcome::Error(e.to_string()),
        };

        TitleRecord { url, outcome }
    }
}

/// Build the plain-HTTP URL for an endpoint.
fn endpoint_url(addr: IpAddr, port: u16) -> String {
    match addr {
        IpAddr::V4(ip) => format!("http://{}:{}", ip, port),
        IpAddr::V6(ip) => format!("http://[{}]:{}", ip, port),
    }
}

/// Extract the first title element's text, whitespace-normalized.
fn extract_title(html: &str) -> Option<String> {
    let captures = TITLE_RE.captures(html)?;
    let text = captures[1].split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
