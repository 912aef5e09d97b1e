//! CLI-side configuration resolution.
//!
//! Layers, highest priority first: CLI flags → environment → profile →
//! defaults. Password resolution falls back to an interactive prompt
//! when stdin is a terminal; non-interactive runs fail fast instead.

use std::io::IsTerminal;

use mrv_config::{Config, ConfigError, Profile};
use mrv_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use mrv_config::config_path;

/// The profile name in effect: `--profile` flag, else the config file's
/// `default_profile`, else "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the device to validate from profiles and flag overrides.
///
/// `interval` is the subcommand's override; `None` keeps the profile's
/// configured interval.
pub fn resolve_device_config(
    global: &GlobalOpts,
    interval: Option<u64>,
) -> Result<DeviceConfig, CliError> {
    let cfg = mrv_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, interval);
    }

    // An explicitly requested profile that doesn't exist is an error,
    // not a fall-through to flags.
    if global.profile.is_some() {
        let mut available: Vec<String> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    resolve_from_flags(global, interval)
}

/// Apply flag overrides on top of a stored profile, then convert.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    interval: Option<u64>,
) -> Result<DeviceConfig, CliError> {
    let mut profile = profile.clone();

    if let Some(ref host) = global.host {
        profile.host = host.clone();
    }
    if let Some(port) = global.port {
        profile.port = port;
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(ref vendor) = global.vendor {
        profile.vendor = vendor.clone();
    }
    profile.timeout = Some(global.timeout);
    if let Some(secs) = interval {
        profile.interval = secs;
    }

    finish(profile, profile_name)
}

/// No profile on disk: build the device purely from flags and env vars.
fn resolve_from_flags(global: &GlobalOpts, interval: Option<u64>) -> Result<DeviceConfig, CliError> {
    let Some(host) = global.host.clone() else {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };
    let Some(vendor) = global.vendor.clone() else {
        return Err(CliError::Validation {
            field: "vendor".into(),
            reason: "required when no profile is configured (--vendor cisco|netgear)".into(),
        });
    };

    let profile = Profile {
        host,
        port: global.port.unwrap_or(22),
        username: global.username.clone(),
        password: None,
        password_env: None,
        vendor,
        interval: interval.unwrap_or(0),
        timeout: Some(global.timeout),
    };

    finish(profile, "(flags)")
}

/// Convert a fully-layered profile, prompting for a password when the
/// credential chain comes up empty and we are on a terminal.
fn finish(mut profile: Profile, profile_name: &str) -> Result<DeviceConfig, CliError> {
    match mrv_config::profile_to_device_config(&profile, profile_name) {
        Ok(device) => Ok(device),
        Err(ConfigError::NoCredentials { .. })
            if profile.username.is_some() && std::io::stdin().is_terminal() =>
        {
            let host = profile.host.clone();
            let username = profile.username.clone().unwrap_or_default();
            let prompted =
                rpassword::prompt_password(format!("Password for {username}@{host}: "))?;
            if prompted.trim().is_empty() {
                return Err(CliError::NoCredentials {
                    profile: profile_name.into(),
                });
            }
            profile.password = Some(prompted);
            mrv_config::profile_to_device_config(&profile, profile_name).map_err(CliError::from)
        }
        Err(e) => Err(e.into()),
    }
}
