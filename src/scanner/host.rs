//! Per-host scan strategy: common ports first, full range as fallback.
//!
//! A hit anywhere in the common list is treated as sufficient evidence of
//! service presence and the full range is skipped. Only a host where the
//! entire common pass comes up empty pays for the 1-65535 sweep.

use crate::output::{self, ProgressMode};
use crate::scanner::prober::{Outcome, Prober};
use crate::scanner::HostReport;
use crate::types::{common_ports, FULL_RANGE};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::debug;

/// Scans one host at a time, fanning out probes up to a concurrency bound.
pub struct HostScanner<P> {
    prober: Arc<P>,
    concurrency: usize,
    progress: ProgressMode,
}

impl<P: Prober + 'static> HostScanner<P> {
    /// Create a host scanner over the given prober.
    ///
    /// `concurrency` bounds how many probes are in flight for a single
    /// host at once.
    pub fn new(prober: Arc<P>, concurrency: usize, progress: ProgressMode) -> Self {
        Self {
            prober,
            concurrency: concurrency.max(1),
            progress,
        }
    }

    /// Scan one host and report its open ports.
    ///
    /// A host with zero reachable ports yields an empty report; probe
    /// errors are logged and treated as not-open, never as a failure of
    /// the host scan itself.
    pub async fn scan_host(&self, addr: IpAddr) -> HostReport {
        let open = self.probe_ports(addr, common_ports()).await;
        if !open.is_empty() {
            return HostReport::new(addr, open);
        }

        debug!(%addr, "no common ports open, falling back to full range");
        if self.progress.announces() {
            output::print_fallback(addr);
        }

        let open = self.probe_ports(addr, FULL_RANGE.collect()).await;
        HostReport::new(addr, open)
    }

    /// Probe a set of candidate ports concurrently, collecting the open
    /// ones. The ordered set guarantees a duplicated candidate can never
    /// be counted twice.
    async fn probe_ports(&self, addr: IpAddr, ports: Vec<u16>) -> BTreeSet<u16> {
        stream::iter(ports)
            .map(|port| {
                let prober = Arc::clone(&self.prober);
                let progress = self.progress;
                async move {
                    if progress.is_verbose() {
                        output::print_probe(addr, port);
                    }
                    match prober.probe(SocketAddr::new(addr, port)).await {
                        Outcome::Open => {
                            if progress.announces() {
                                output::print_open_port(addr, port);
                            }
                            Some(port)
                        }
                        Outcome::Closed => None,
                        Outcome::Error(reason) => {
                            debug!(%addr, port, %reason, "probe error");
                            None
                        }
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|port| async move { port })
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Prober stub: fixed open set, counts every probe it receives.
    struct StubProber {
        open: HashSet<SocketAddr>,
        errors: HashSet<SocketAddr>,
        probes: AtomicUsize,
    }

    impl StubProber {
        fn new(open: &[SocketAddr]) -> Self {
            Self {
                open: open.iter().copied().collect(),
                errors: HashSet::new(),
                probes: AtomicUsize::new(0),
            }
        }

        fn probe_count(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Prober for StubProber {
        async fn probe(&self, addr: SocketAddr) -> Outcome {
            self.probes.fetch_add(1, Ordering::SeqCst);
            if self.open.contains(&addr) {
                Outcome::Open
            } else if self.errors.contains(&addr) {
                Outcome::Error("permission denied".into())
            } else {
                Outcome::Closed
            }
        }
    }

    fn sock(ip: &str, port: u16) -> SocketAddr {
        SocketAddr::new(ip.parse().unwrap(), port)
    }

    #[tokio::test]
    async fn test_common_hit_skips_full_range() {
        let addr: IpAddr = "10.0.0.1".parse().unwrap();
        let prober = Arc::new(StubProber::new(&[sock("10.0.0.1", 80)]));
        let scanner = HostScanner::new(Arc::clone(&prober), 64, ProgressMode::Silent);

        let report = scanner.scan_host(addr).await;

        assert_eq!(report.open_ports, vec![80]);
        // Exactly one probe per common port, full range never touched.
        assert_eq!(prober.probe_count(), common_ports().len());
    }

    #[tokio::test]
    async fn test_fallback_scans_full_range() {
        let addr: IpAddr = "10.0.0.2".parse().unwrap();
        // 40000 is not in the common list, so only the fallback finds it.
        let prober = Arc::new(StubProber::new(&[sock("10.0.0.2", 40000)]));
        let scanner = HostScanner::new(Arc::clone(&prober), 256, ProgressMode::Silent);

        let report = scanner.scan_host(addr).await;

        assert_eq!(report.open_ports, vec![40000]);
        assert_eq!(prober.probe_count(), common_ports().len() + 65535);
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_report() {
        let addr: IpAddr = "10.0.0.3".parse().unwrap();
        let prober = Arc::new(StubProber::new(&[]));
        let scanner = HostScanner::new(prober, 256, ProgressMode::Silent);

        let report = scanner.scan_host(addr).await;

        assert!(report.open_ports.is_empty());
        assert!(!report.has_open_ports());
    }

    #[tokio::test]
    async fn test_probe_errors_treated_as_not_open() {
        let addr: IpAddr = "10.0.0.4".parse().unwrap();
        let mut prober = StubProber::new(&[sock("10.0.0.4", 443)]);
        prober.errors.insert(sock("10.0.0.4", 80));
        let scanner = HostScanner::new(Arc::new(prober), 64, ProgressMode::Silent);

        let report = scanner.scan_host(addr).await;

        // The errored probe neither aborts the host nor shows up as open.
        assert_eq!(report.open_ports, vec![443]);
    }

    #[tokio::test]
    async fn test_multiple_common_ports_sorted() {
        let addr: IpAddr = "10.0.0.5".parse().unwrap();
        let prober = Arc::new(StubProber::new(&[
            sock("10.0.0.5", 443),
            sock("10.0.0.5", 22),
            sock("10.0.0.5", 8080),
        ]));
        let scanner = HostScanner::new(prober, 64, ProgressMode::Silent);

        let report = scanner.scan_host(addr).await;

        assert_eq!(report.open_ports, vec![22, 443, 8080]);
    }
}
