//! Shared configuration for the mrv CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `mrv_core::DeviceConfig`. The CLI adds flag-aware
//! wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mrv_core::{DeviceConfig, Vendor};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named switch profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named switch profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Switch hostname or IP address.
    pub host: String,

    /// SSH port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SSH username.
    pub username: Option<String>,

    /// SSH password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Switch vendor ("cisco" or "netgear").
    pub vendor: String,

    /// Polling interval in seconds (0 = run once).
    #[serde(default)]
    pub interval: u64,

    /// Override command timeout.
    pub timeout: Option<u64>,
}

fn default_port() -> u16 {
    22
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "mrv", "mrv").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("mrv");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("MRV_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a profile's SSH password from the credential chain.
///
/// Order: `MRV_PASSWORD` env var → profile's `password_env` → system
/// keyring → plaintext in the config file.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Well-known env var
    if let Ok(pw) = std::env::var("MRV_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 2. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("mrv", &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Parse and validate a profile's vendor field.
pub fn resolve_vendor(profile: &Profile) -> Result<Vendor, ConfigError> {
    profile
        .vendor
        .parse::<Vendor>()
        .map_err(|_| ConfigError::Validation {
            field: "vendor".into(),
            reason: format!("expected 'cisco' or 'netgear', got '{}'", profile.vendor),
        })
}

/// Build a `DeviceConfig` from a profile — no CLI flag overrides.
pub fn profile_to_device_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<DeviceConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "host cannot be empty".into(),
        });
    }

    // Vendor validation precedes credential resolution: a typo'd vendor
    // should not surface as a missing-credential error.
    let vendor = resolve_vendor(profile)?;

    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("MRV_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = resolve_password(profile, profile_name)?;
    let command_timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout()));

    Ok(DeviceConfig {
        host: profile.host.clone(),
        port: profile.port,
        username,
        password,
        vendor,
        interval_secs: profile.interval,
        command_timeout,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn profile() -> Profile {
        Profile {
            host: "sw1.example.net".into(),
            port: 22,
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            password_env: None,
            vendor: "cisco".into(),
            interval: 0,
            timeout: None,
        }
    }

    #[test]
    fn profile_converts_to_device_config() {
        let config = profile_to_device_config(&profile(), "lab").unwrap();
        assert_eq!(config.host, "sw1.example.net");
        assert_eq!(config.port, 22);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password.expose_secret(), "hunter2");
        assert_eq!(config.vendor, Vendor::Cisco);
        assert_eq!(config.interval_secs, 0);
        assert_eq!(config.command_timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_vendor_is_rejected() {
        let mut bad = profile();
        bad.vendor = "juniper".into();
        let err = profile_to_device_config(&bad, "lab").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "vendor"));
    }

    #[test]
    fn empty_host_is_rejected() {
        let mut bad = profile();
        bad.host = "  ".into();
        let err = profile_to_device_config(&bad, "lab").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
    }

    #[test]
    fn missing_credentials_are_reported_per_profile() {
        let mut bare = profile();
        bare.username = None;
        // Ensure the env fallback doesn't mask the failure.
        // (Serial test env mutation is avoided; we only assert when unset.)
        if std::env::var("MRV_USERNAME").is_err() {
            let err = profile_to_device_config(&bare, "lab").unwrap_err();
            assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "lab"));
        }
    }

    #[test]
    fn vendor_parse_accepts_mixed_case() {
        let mut p = profile();
        p.vendor = "Netgear".into();
        assert_eq!(resolve_vendor(&p).unwrap(), Vendor::Netgear);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.default_profile.as_deref(), Some("default"));
        assert_eq!(parsed.defaults.output, "table");
        assert_eq!(parsed.defaults.timeout, 30);
    }
}
