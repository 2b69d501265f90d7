//! Service naming for the common-port list.
//!
//! Open-port and summary lines annotate ports with a likely service name.
//! Only the ports in the priority list are covered; everything else
//! prints bare.

/// Look up the probable service name for a port in the common list.
pub fn service_name(port: u16) -> Option<&'static str> {
    let name = match port {
        21 => "ftp",
        22 => "ssh",
        23 => "telnet",
        25 => "smtp",
        53 => "dns",
        80 => "http",
        110 => "pop3",
        115 => "sftp",
        123 => "ntp",
        135 => "msrpc",
        139 => "netbios-ssn",
        143 => "imap",
        161 => "snmp",
        194 => "irc",
        443 => "https",
        445 => "microsoft-ds",
        465 => "smtps",
        554 => "rtsp",
        587 => "submission",
        993 => "imaps",
        995 => "pop3s",
        1433 => "mssql",
        1521 => "oracle",
        3000 => "http-dev",
        3306 => "mysql",
        3389 => "rdp",
        4000 => "http-dev",
        5000 => "http-dev",
        5432 => "postgresql",
        6379 => "redis",
        8000 => "http-alt",
        8080 => "http-proxy",
        8081..=8088 => "http-alt",
        8200 => "vault",
        8443 => "https-alt",
        8888 => "http-alt",
        9000 => "http-alt",
        11211 => "memcached",
        27017 => "mongodb",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::common_ports;

    #[test]
    fn test_common_ports_all_named() {
        for port in common_ports() {
            assert!(service_name(port).is_some(), "port {} unnamed", port);
        }
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(service_name(12345), None);
    }
}
