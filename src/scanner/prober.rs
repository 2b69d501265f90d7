//! Single-port TCP connect probing.
//!
//! One connection attempt per (host, port) pair under a fixed timeout.
//! A completed handshake is all the evidence we want; the stream is
//! dropped immediately, no banner reads. The fixed timeout is what makes
//! a 65535-port fallback pass tractable.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Result of a single connection attempt.
///
/// Failures never cross this boundary as `Err`: a refused, unreachable,
/// or timed-out attempt is `Closed`, and anything else the OS reports
/// (resolution failure, permission problem) is `Error` with the reason
/// preserved so callers and tests can assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Connection established; a service is listening.
    Open,
    /// Refused, unreachable, or timed out.
    Closed,
    /// Unexpected OS-level failure.
    Error(String),
}

impl Outcome {
    /// Check if the probe found a listening service.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Trait for single-port probers.
///
/// This is the seam that lets the host scanner and sweep coordinator be
/// tested with a stub prober and no sockets.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Attempt one connection to `addr`, resolving to an [`Outcome`].
    async fn probe(&self, addr: SocketAddr) -> Outcome;
}

/// TCP connect prober.
///
/// Uses standard socket connect() calls, so no elevated privileges are
/// required.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    /// Create a prober with the given per-attempt timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, addr: SocketAddr) -> Outcome {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Outcome::Open
            }
            Ok(Err(e)) => classify_connect_error(&e),
            Err(_) => Outcome::Closed,
        }
    }
}

/// Map a connect() failure onto the outcome taxonomy.
fn classify_connect_error(e: &std::io::Error) -> Outcome {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted => Outcome::Closed,
        _ => {
            // Host/network-unreachable kinds are not stable across
            // platforms; fall back to the message.
            if e.to_string().to_lowercase().contains("unreachable") {
                Outcome::Closed
            } else {
                Outcome::Error(e.to_string())
            }
        }
    }
}
