//! Host classification helpers for the `NET_CONNECT`/`NET_RESOLVE` rules
//! of spec §4.3 (`allowLocalhost`, `allowPrivateNetworks`).

use ipnet::IpNet;
use std::net::IpAddr;
use std::str::FromStr;

fn private_networks() -> Vec<IpNet> {
    [
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "169.254.0.0/16",
        "fc00::/7",
        "fe80::/10",
    ]
    .iter()
    .map(|s| IpNet::from_str(s).expect("static CIDR literal"))
    .collect()
}

/// True if `host` (an IP literal or the bare string `localhost`) refers to
/// the loopback interface.
pub fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    match IpAddr::from_str(host) {
        Ok(ip) => ip.is_loopback(),
        Err(_) => false,
    }
}

/// True if `host` is an IP literal within RFC1918 or link-local ranges.
/// Non-IP hostnames are never classified as private by this check; the
/// firewall only gets a raw `host:port` string from the adapter and does
/// not perform DNS resolution to decide trust.
pub fn is_private_network_host(host: &str) -> bool {
    match IpAddr::from_str(host) {
        Ok(ip) => private_networks().iter().any(|net| net.contains(&ip)),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_detection() {
        assert!(is_loopback_host("127.0.0.1"));
        assert!(is_loopback_host("::1"));
        assert!(is_loopback_host("localhost"));
        assert!(is_loopback_host("LOCALHOST"));
        assert!(!is_loopback_host("example.com"));
    }

    #[test]
    fn private_network_detection() {
        assert!(is_private_network_host("10.1.2.3"));
        assert!(is_private_network_host("192.168.1.1"));
        assert!(is_private_network_host("172.16.0.5"));
        assert!(!is_private_network_host("8.8.8.8"));
        assert!(!is_private_network_host("example.com"));
    }
}
