// ── Runtime device configuration ──
//
// Describes *which* device to validate and how often. Carries credential
// data and polling tuning, but never touches disk. The CLI constructs a
// `DeviceConfig` from profiles/flags and hands it in already validated.

use std::time::Duration;

use secrecy::SecretString;

use crate::vendor::Vendor;

/// Configuration for validating a single switch.
///
/// Built by the CLI, passed into session construction and the
/// [`Poller`](crate::Poller) -- core never reads config files or prompts.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Switch hostname or IP address.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// SSH username (non-empty).
    pub username: String,
    /// SSH password (non-empty).
    pub password: SecretString,
    /// Vendor, selects the command set.
    pub vendor: Vendor,
    /// Seconds between validation cycles. 0 = run exactly once.
    pub interval_secs: u64,
    /// Per-command execution timeout.
    pub command_timeout: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".into(),
            port: 22,
            username: "admin".into(),
            password: SecretString::from(String::new()),
            vendor: Vendor::Cisco,
            interval_secs: 0,
            command_timeout: Duration::from_secs(30),
        }
    }
}
