//! Prioritized port candidates for the sweep phase.
//!
//! Hosts are checked against a fixed list of common ports before any
//! full-range fallback. The list is ordered by how likely a hit is to
//! indicate an interesting service, not numerically.

/// Inclusive bounds of the full TCP port range used by the fallback pass.
pub const FULL_RANGE: std::ops::RangeInclusive<u16> = 1..=65535;

/// Raw priority table. May contain duplicates across thematic groups;
/// use [`common_ports`] for the deduplicated scan order.
const COMMON_PORTS: &[u16] = &[
    // Web
    80, 443, 8080, 8443,
    // CCTV and streaming
    554, 8000, 8081, 8888,
    // Jenkins and other alternate HTTP services
    8080, 8081, 8082, 8083, 8084, 8085, 8086, 8087, 8088,
    // Development servers
    3000, 4000, 5000, 8000, 9000,
    // Windows services
    135, 139, 445, 3389,
    // HashiCorp Vault
    8200,
    // Classic services
    21, 22, 23, 25, 53, 110, 115, 123, 143, 161, 194, 443, 465, 587, 993, 995,
    // Databases
    1433, 1521, 3306, 5432,
    // Caches and NoSQL
    6379, 11211, 27017,
];

/// The common-port scan order: the priority table with duplicates removed,
/// first occurrence winning. A port listed twice must never be probed twice
/// or counted twice as open.
pub fn common_ports() -> Vec<u16> {
    let mut seen = [false; 65536];
    let mut ports = Vec::with_capacity(COMMON_PORTS.len());
    for &port in COMMON_PORTS {
        if !seen[port as usize] {
            seen[port as usize] = true;
            ports.push(port);
        }
    }
    ports
}
