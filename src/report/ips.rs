//! Public IP collection
//!
//! Extracts the public IP of each Jump Client, validates it as an IPv4/IPv6
//! literal, deduplicates, and sorts. Invalid values are skipped rather than
//! failing the export; upstream data quality varies.

use crate::types::JumpClient;
use std::collections::BTreeSet;
use std::net::IpAddr;

/// Collect the distinct, valid public IPs of the given jump clients
///
/// Ordering follows [`IpAddr`]'s comparison: IPv4 before IPv6, numeric per
/// octet/segment (so `2.2.2.2` sorts before `10.0.0.1`).
pub fn collect_public_ips(clients: &[JumpClient]) -> Vec<IpAddr> {
    let mut addresses: BTreeSet<IpAddr> = BTreeSet::new();

    for client in clients {
        let Some(raw) = client.public_ip.as_deref() else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match raw.parse::<IpAddr>() {
            Ok(address) => {
                addresses.insert(address);
            }
            Err(_) => {
                tracing::debug!("Skipping invalid public_ip value: {:?}", raw);
            }
        }
    }

    addresses.into_iter().collect()
}

/// Render the address list as a newline-joined body
///
/// One address per line with a trailing newline; empty input renders as an
/// empty body.
pub fn render_ip_list(addresses: &[IpAddr]) -> String {
    let mut body = String::new();
    for address in addresses {
        body.push_str(&address.to_string());
        body.push('\n');
    }
    body
}
