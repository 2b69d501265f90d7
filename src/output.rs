//! Console output.
//!
//! The sweep streams line-oriented progress to stdout as results are
//! produced; nothing is buffered until the end. Plain mode is the
//! human-facing contract; ndjson emits one JSON object per host report
//! and per title record for machine consumption.

use crate::scanner::HostReport;
use crate::services::service_name;
use crate::titles::TitleRecord;
use console::style;
use std::io::{self, Write};
use std::net::IpAddr;

/// How much the scan narrates while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// No streamed lines (library use, machine output).
    Silent,
    /// Open-port discoveries, fallback notices, and title records.
    Normal,
    /// Everything, including one line per probe attempt.
    Verbose,
}

impl ProgressMode {
    /// Whether discovery lines are printed as they happen.
    pub fn announces(self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Whether per-probe lines are printed.
    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Per-probe progress line (verbose mode only; a fallback pass emits
/// 65535 of these per host).
pub fn print_probe(addr: IpAddr, port: u16) {
    println!("Scanning {}:{}", addr, port);
}

/// Announce an open port the moment it is found.
pub fn print_open_port(addr: IpAddr, port: u16) {
    let endpoint = format!("{}:{}", addr, port);
    match service_name(port) {
        Some(service) => println!(
            "Open port found: {} ({})",
            style(endpoint).green().bold(),
            service
        ),
        None => println!("Open port found: {}", style(endpoint).green().bold()),
    }
}

/// Announce the full-range fallback for a host with no common ports open.
pub fn print_fallback(addr: IpAddr) {
    println!(
        "No common ports open for {}. Scanning all ports...",
        style(addr).yellow()
    );
}

/// Per-host summary line, printed after the sweep barrier.
pub fn print_host_summary(report: &HostReport) {
    let ports: Vec<String> = report.open_ports.iter().map(u16::to_string).collect();
    println!(
        "IP: {}, Open Ports: [{}]",
        style(report.addr).bold(),
        ports.join(", ")
    );
}

/// One line per fetched endpoint.
pub fn print_title_record(record: &TitleRecord) {
    println!(
        "URL: {}, Title: {}",
        style(&record.url).cyan(),
        record.outcome
    );
}

/// Emit host reports and title records as newline-delimited JSON.
pub fn print_ndjson(reports: &[HostReport], records: &[TitleRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for report in reports {
        let line = serde_json::to_string(report).map_err(io::Error::other)?;
        writeln!(out, "{}", line)?;
    }
    for record in records {
        let line = serde_json::to_string(record).map_err(io::Error::other)?;
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_mode_gates() {
        assert!(!ProgressMode::Silent.announces());
        assert!(ProgressMode::Normal.announces());
        assert!(!ProgressMode::Normal.is_verbose());
        assert!(ProgressMode::Verbose.announces());
        assert!(ProgressMode::Verbose.is_verbose());
    }

    #[test]
    fn test_ndjson_shapes() {
        use std::collections::BTreeSet;

        let report = HostReport::new(
            "192.0.2.1".parse().unwrap(),
            BTreeSet::from([80u16, 443]),
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"192.0.2.1\""));
        assert!(json.contains("[80,443]"));
    }
}
