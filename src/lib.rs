//! # trawl - Concurrent CIDR Sweep with HTTP Title Discovery
//!
//! trawl sweeps an address range for hosts with open TCP ports, then
//! probes the discovered endpoints for HTTP page titles.
//!
//! ## How a sweep works
//!
//! - The target (CIDR, IP, or hostname) expands to an ordered address
//!   list, partitioned into contiguous chunks across parallel workers.
//! - Each worker scans its chunk's hosts concurrently. A host is checked
//!   against a prioritized common-port list first; only if nothing is
//!   open there does it fall back to the full 1-65535 range. Every probe
//!   is a single bounded connect attempt.
//! - After all workers join, every open endpoint receives one bounded
//!   HTTP GET and the response is parsed for a `<title>` element.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use trawl::scanner::{run_sweep, SweepConfig, TcpProber};
//! use trawl::titles::TitleFetcher;
//! use trawl::types::TargetSpec;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let hosts = TargetSpec::parse("10.10.10.0/28")
//!         .unwrap()
//!         .expand()
//!         .await
//!         .unwrap();
//!
//!     let config = SweepConfig::default();
//!     let prober = Arc::new(TcpProber::new(config.probe_timeout));
//!     let reports = run_sweep(prober, &hosts, &config).await;
//!
//!     for report in reports.iter().filter(|r| r.has_open_ports()) {
//!         println!("{}: {:?}", report.addr, report.open_ports);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target parsing/expansion and the common-port priority list
//! - [`scanner`] - The `Prober` seam, per-host strategy, partitioner, and
//!   sweep coordinator
//! - [`titles`] - The HTTP title-fetch phase
//! - [`output`] - Streamed console output and ndjson records
//! - [`error`] - Fatal error types (per-probe failures are outcomes, not
//!   errors)

pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod titles;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, CliResult};
pub use scanner::{run_sweep, HostReport, Outcome, Prober, SweepConfig, TcpProber};
pub use titles::{TitleFetcher, TitleOutcome, TitleRecord};
pub use types::{TargetError, TargetSpec};
