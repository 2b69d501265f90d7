//! Command-line interface definitions for trawl.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::error::{CliError, CliResult};
use crate::output::{self, ProgressMode};
use crate::scanner::{self, SweepConfig, TcpProber};
use crate::titles::TitleFetcher;
use crate::types::TargetSpec;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A concurrent CIDR sweep scanner with HTTP title discovery.
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sweep a CIDR range for open ports and fetch HTTP titles", long_about = None)]
pub struct Args {
    /// Target to sweep (CIDR range, single IP, or hostname)
    ///
    /// Examples:
    ///   10.10.10.0/24      CIDR range
    ///   192.168.1.1        Single IP address
    ///   example.com        Hostname
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Number of parallel sweep workers (0 = one per CPU)
    #[arg(short = 'w', long, default_value = "0")]
    pub workers: usize,

    /// Connect/request timeout in milliseconds (both phases)
    #[arg(short = 't', long, default_value = "1000")]
    pub timeout: u64,

    /// Maximum in-flight probes per host
    #[arg(short = 'c', long, default_value = "500")]
    pub concurrency: usize,

    /// Maximum in-flight title fetches
    #[arg(long, default_value = "50")]
    pub fetch_concurrency: usize,

    /// Skip the HTTP title phase
    #[arg(long)]
    pub no_titles: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Show per-probe progress lines
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress streamed progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable line-oriented text
    Plain,
    /// Newline-delimited JSON records
    Ndjson,
}

impl Args {
    /// Run both phases: sweep, then title fetch.
    pub async fn execute(&self) -> CliResult<()> {
        let spec = TargetSpec::parse(&self.target)?;
        let hosts = spec.expand().await?;
        if hosts.is_empty() {
            return Err(CliError::Other("no hosts to scan".to_string()));
        }

        // ndjson goes to stdout, so streamed progress must stay off it.
        let progress = if self.quiet || self.output == OutputFormat::Ndjson {
            ProgressMode::Silent
        } else if self.verbose {
            ProgressMode::Verbose
        } else {
            ProgressMode::Normal
        };

        let timeout = Duration::from_millis(self.timeout);
        let config = SweepConfig::default()
            .with_workers(self.workers)
            .with_probe_timeout(timeout)
            .with_probe_concurrency(self.concurrency)
            .with_progress(progress);

        info!(
            target = %spec,
            hosts = hosts.len(),
            workers = config.workers,
            "sweep starting"
        );

        let prober = Arc::new(TcpProber::new(config.probe_timeout));
        let reports = scanner::run_sweep(prober, &hosts, &config).await;

        if progress.announces() {
            for report in reports.iter().filter(|r| r.has_open_ports()) {
                output::print_host_summary(report);
            }
        }

        let records = if self.no_titles {
            Vec::new()
        } else {
            let fetcher = TitleFetcher::new(timeout, self.fetch_concurrency, progress)?;
            fetcher.fetch_all(&reports).await
        };

        if self.output == OutputFormat::Ndjson {
            output::print_ndjson(&reports, &records)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_required() {
        assert!(Args::try_parse_from(["trawl"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["trawl", "10.10.10.0/24"]).unwrap();
        assert_eq!(args.target, "10.10.10.0/24");
        assert_eq!(args.workers, 0);
        assert_eq!(args.timeout, 1000);
        assert_eq!(args.concurrency, 500);
        assert_eq!(args.output, OutputFormat::Plain);
        assert!(!args.no_titles);
    }

    #[test]
    fn test_flag_parsing() {
        let args = Args::try_parse_from([
            "trawl",
            "192.168.1.0/28",
            "-w",
            "4",
            "-t",
            "250",
            "--no-titles",
            "-o",
            "ndjson",
        ])
        .unwrap();
        assert_eq!(args.workers, 4);
        assert_eq!(args.timeout, 250);
        assert!(args.no_titles);
        assert_eq!(args.output, OutputFormat::Ndjson);
    }

    #[tokio::test]
    async fn test_malformed_target_fails_before_any_io() {
        let args = Args::try_parse_from(["trawl", "not-a-cidr"]).unwrap();
        let err = args.execute().await.unwrap_err();
        assert!(matches!(err, CliError::Target(_)));
    }
}
