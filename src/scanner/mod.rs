//! Sweep coordination across parallel workers.
//!
//! The address space is partitioned into contiguous chunks, one tokio
//! task per chunk. Each worker scans its chunk's hosts concurrently, so
//! there are two levels of fan-out: across workers and across hosts
//! within a worker. Workers share no mutable state; each hands its
//! reports back by value and the coordinator joins all of them before
//! aggregating.

pub mod host;
pub mod partition;
pub mod prober;

pub use host::HostScanner;
pub use partition::partition;
pub use prober::{Outcome, Prober, TcpProber};

use crate::output::ProgressMode;
use futures::future;
use serde::Serialize;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Open ports found on one host. Immutable once the host scan finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
    /// Host address.
    pub addr: IpAddr,
    /// Open ports, sorted ascending.
    pub open_ports: Vec<u16>,
}

impl HostReport {
    /// Build a report from the open-port set of a finished host scan.
    pub fn new(addr: IpAddr, open: BTreeSet<u16>) -> Self {
        Self {
            addr,
            open_ports: open.into_iter().collect(),
        }
    }

    /// Check whether anything was found on this host.
    pub fn has_open_ports(&self) -> bool {
        !self.open_ports.is_empty()
    }
}

/// Configuration for a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Number of parallel workers (chunks).
    pub workers: usize,
    /// Per-probe connect timeout.
    pub probe_timeout: Duration,
    /// In-flight probe bound per host.
    pub probe_concurrency: usize,
    /// Console progress behaviour.
    pub progress: ProgressMode,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            probe_timeout: Duration::from_millis(1000),
            probe_concurrency: 500,
            progress: ProgressMode::Silent,
        }
    }
}

impl SweepConfig {
    /// Set the worker count; `0` selects the hardware default.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 {
            default_workers()
        } else {
            workers
        };
        self
    }

    /// Set the per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the per-host probe fan-out bound.
    pub fn with_probe_concurrency(mut self, concurrency: usize) -> Self {
        self.probe_concurrency = concurrency.max(1);
        self
    }

    /// Set the console progress mode.
    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }
}

/// Available hardware parallelism, used when no worker count is given.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}

/// Run the sweep phase over `hosts` and aggregate per-host reports.
///
/// All workers are joined before anything is returned (the phase
/// barrier); no partial results are consumed mid-flight. Reports keep
/// their chunk's address order. A worker that fails degrades to missing
/// reports for its chunk and a warning, never an aborted run.
pub async fn run_sweep<P>(prober: Arc<P>, hosts: &[IpAddr], config: &SweepConfig) -> Vec<HostReport>
where
    P: Prober + 'static,
{
    let chunks = partition(hosts, config.workers);
    debug!(
        hosts = hosts.len(),
        workers = chunks.len(),
        concurrency = config.probe_concurrency,
        "starting sweep"
    );

    let mut handles = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let prober = Arc::clone(&prober);
        let concurrency = config.probe_concurrency;
        let progress = config.progress;

        handles.push(tokio::spawn(async move {
            let scanner = HostScanner::new(prober, concurrency, progress);
            // join_all keeps the chunk's address order while the host
            // scans themselves run concurrently.
            future::join_all(chunk.iter().map(|&addr| scanner.scan_host(addr))).await
        }));
    }

    let mut aggregate = Vec::with_capacity(hosts.len());
    for handle in handles {
        match handle.await {
            Ok(reports) => aggregate.extend(reports),
            Err(e) => warn!(error = %e, "sweep worker failed, dropping its chunk"),
        }
    }

    debug!(
        scanned = aggregate.len(),
        with_findings = aggregate.iter().filter(|r| r.has_open_ports()).count(),
        "sweep complete"
    );
    aggregate
}
