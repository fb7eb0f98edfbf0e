//! Export contract compatibility tests
//!
//! Downstream consumers (endpoint-management tooling, firewall automation)
//! parse these outputs by exact field name and line format. These tests pin
//! the contract.

use bt_jump_export::report::{build_installer_report, collect_public_ips, render_ip_list};
use bt_jump_export::types::{JumpClient, JumpClientInstaller, JumpGroup};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

mod common;

fn installer(id: &str, name: &str, group: &str, expiration: &str) -> JumpClientInstaller {
    JumpClientInstaller {
        installer_id: id.to_string(),
        name: name.to_string(),
        jump_group_id: group.to_string(),
        expiration_timestamp: expiration.parse::<DateTime<Utc>>().unwrap(),
    }
}

#[test]
fn test_installer_record_json_field_names() {
    let groups = vec![JumpGroup {
        id: "G1".to_string(),
        name: "Sales".to_string(),
    }];
    let installers = vec![installer("abc", "sales-pkg", "G1", "2027-01-01T00:00:00Z")];

    let report = build_installer_report("https://pam.example.com", &groups, &installers);
    let json_str = serde_json::to_string(&report).unwrap();

    // Exact field names the downstream tooling expects
    assert!(json_str.contains("\"JumpGroupName\""));
    assert!(json_str.contains("\"InstallerName\""));
    assert!(json_str.contains("\"InstallerID\""));
    assert!(json_str.contains("\"ExpirationDate\""));
    assert!(json_str.contains("\"WindowsDownloadURL\""));
    assert!(json_str.contains("\"MacDownloadURL\""));

    // No snake_case variants
    assert!(!json_str.contains("\"jump_group_name\""));
    assert!(!json_str.contains("\"installer_id\""));
}

#[test]
fn test_installer_report_latest_per_group() {
    let groups = vec![JumpGroup {
        id: "G1".to_string(),
        name: "Sales".to_string(),
    }];
    let installers = vec![
        installer("A", "a", "G1", "2026-01-01T00:00:00Z"),
        installer("B", "b", "G1", "2027-01-01T00:00:00Z"),
    ];

    let report = build_installer_report("https://pam.example.com", &groups, &installers);
    let json = serde_json::to_value(&report).unwrap();
    let records = json.as_array().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["JumpGroupName"], "Sales");
    assert_eq!(records[0]["InstallerID"], "B");
    assert!(
        records[0]["ExpirationDate"]
            .as_str()
            .unwrap()
            .starts_with("2027-01-01")
    );
}

#[test]
fn test_installer_report_round_trip() {
    let groups = vec![JumpGroup {
        id: "G1".to_string(),
        name: "Sales".to_string(),
    }];
    let installers = vec![installer("abc", "pkg", "G1", "2027-01-01T00:00:00Z")];

    let report = build_installer_report("https://pam.example.com", &groups, &installers);
    let json_str = serde_json::to_string(&report).unwrap();
    let parsed: Vec<bt_jump_export::InstallerRecord> = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].installer_id, "abc");
    assert_eq!(parsed[0].jump_group_name, "Sales");
}

#[test]
fn test_ip_list_line_format() {
    let clients: Vec<JumpClient> = ["10.0.0.1", "bad-ip", "10.0.0.1", "2.2.2.2"]
        .iter()
        .map(|ip| JumpClient {
            public_ip: Some(ip.to_string()),
        })
        .collect();

    let addresses = collect_public_ips(&clients);
    let body = render_ip_list(&addresses);

    // Deduplicated, invalid dropped, sorted numerically, one per line
    assert_eq!(body, "2.2.2.2\n10.0.0.1\n");
}
