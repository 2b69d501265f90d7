//! Core type definitions.

pub mod ports;
pub mod target;

pub use ports::{common_ports, FULL_RANGE};
pub use target::{TargetError, TargetSpec};
