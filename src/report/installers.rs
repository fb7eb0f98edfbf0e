//! Installer aggregation
//!
//! Reduces the full installer listing to one record per Jump Group: the
//! installer with the latest expiration, enriched with the group name and
//! synthesized download URLs.

use crate::types::{InstallerRecord, JumpClientInstaller, JumpGroup};
use std::collections::HashMap;

/// Platform code for the Windows 64-bit MSI package
const WINDOWS_PLATFORM: &str = "winNT-64-msi";
/// Platform code for the macOS package
const MAC_PLATFORM: &str = "mac-osx-x86";

/// Synthesize a `download_client_connector` URL for an installer
fn download_url(site_url: &str, installer_id: &str, platform: &str) -> String {
    format!(
        "{}/download_client_connector?jc={}&p={}",
        site_url, installer_id, platform
    )
}

/// Name shown when an installer references a Jump Group the listing does not
/// contain
fn unknown_group_name(group_id: &str) -> String {
    format!("Unknown Group (ID: {})", group_id)
}

/// Build the installer export from the raw listings
///
/// One record per distinct `jump_group_id` present in the installer list.
/// Within a group the maximum `expiration_timestamp` wins; on an exact tie
/// the first installer in fetch order is kept. Records come back ordered by
/// group name (then group id) so repeated exports diff cleanly.
pub fn build_installer_report(
    site_url: &str,
    groups: &[JumpGroup],
    installers: &[JumpClientInstaller],
) -> Vec<InstallerRecord> {
    let group_names: HashMap<&str, &str> = groups
        .iter()
        .map(|group| (group.id.as_str(), group.name.as_str()))
        .collect();

    // Strictly-greater comparison keeps the first occurrence on equal timestamps
    let mut latest: HashMap<&str, &JumpClientInstaller> = HashMap::new();
    for installer in installers {
        latest
            .entry(installer.jump_group_id.as_str())
            .and_modify(|current| {
                if installer.expiration_timestamp > current.expiration_timestamp {
                    *current = installer;
                }
            })
            .or_insert(installer);
    }

    let mut records: Vec<(&str, InstallerRecord)> = latest
        .into_iter()
        .map(|(group_id, installer)| {
            let jump_group_name = group_names
                .get(group_id)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| unknown_group_name(group_id));

            let record = InstallerRecord {
                jump_group_name,
                installer_name: installer.name.clone(),
                installer_id: installer.installer_id.clone(),
                expiration_date: installer.expiration_timestamp,
                windows_download_url: download_url(
                    site_url,
                    &installer.installer_id,
                    WINDOWS_PLATFORM,
                ),
                mac_download_url: download_url(site_url, &installer.installer_id, MAC_PLATFORM),
            };
            (group_id, record)
        })
        .collect();

    records.sort_by(|(a_id, a), (b_id, b)| {
        a.jump_group_name
            .cmp(&b.jump_group_name)
            .then_with(|| a_id.cmp(b_id))
    });

    records.into_iter().map(|(_, record)| record).collect()
}
