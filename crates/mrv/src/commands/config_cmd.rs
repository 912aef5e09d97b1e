//! Config subcommand handlers.

use dialoguer::{Input, Select};

use mrv_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

// ── Field validators ────────────────────────────────────────────────
//
// Pure validate-or-reject functions, one per prompted field. Kept
// independent of the prompt loop so they are testable and reusable.

fn validate_host(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("host cannot be empty".into());
    }
    if value.parse::<std::net::IpAddr>().is_ok() {
        return Ok(());
    }
    let valid_hostname = value.len() <= 253
        && value.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && !label.starts_with('-')
                && !label.ends_with('-')
        });
    if valid_hostname {
        Ok(())
    } else {
        Err(format!("'{value}' is not a valid hostname or IP address"))
    }
}

fn validate_port(value: &str) -> Result<(), String> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(()),
        _ => Err("port must be a number between 1 and 65535".into()),
    }
}

fn validate_nonempty(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("value cannot be empty".into())
    } else {
        Ok(())
    }
}

fn validate_interval(value: &str) -> Result<(), String> {
    value
        .trim()
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| "interval must be a number >= 0".into())
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn keyring_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: format!("failed to access keyring: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => init_wizard(global),

        // ── Show: effective config, secrets redacted ────────────────
        ConfigCommand::Show => {
            let mut cfg = mrv_config::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            println!("{rendered}");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = mrv_config::load_config_or_default();
            let name = profile
                .or_else(|| global.profile.clone())
                .or_else(|| cfg.default_profile.clone())
                .unwrap_or_else(|| "default".into());

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            let entry =
                keyring::Entry::new("mrv", &format!("{name}/password")).map_err(keyring_err)?;
            entry.set_password(&secret).map_err(keyring_err)?;
            eprintln!("Password for profile '{name}' stored in system keyring");
            Ok(())
        }
    }
}

// ── Init wizard ─────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
fn init_wizard(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("mrv — configuration wizard");
    eprintln!("  Config path: {}\n", config_path.display());

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Switch host
    let host: String = Input::new()
        .with_prompt("Switch hostname/IP")
        .validate_with(|v: &String| validate_host(v))
        .interact_text()
        .map_err(prompt_err)?;

    // 3. SSH port
    let port_input: String = Input::new()
        .with_prompt("SSH port")
        .default("22".into())
        .validate_with(|v: &String| validate_port(v))
        .interact_text()
        .map_err(prompt_err)?;
    let port: u16 = port_input.trim().parse().map_err(|_| CliError::Validation {
        field: "port".into(),
        reason: "port must be a number between 1 and 65535".into(),
    })?;

    // 4. Username
    let username: String = Input::new()
        .with_prompt("SSH username")
        .validate_with(|v: &String| validate_nonempty(v))
        .interact_text()
        .map_err(prompt_err)?;

    // 5. Vendor
    let vendor_choices = &["cisco", "netgear"];
    let vendor_selection = Select::new()
        .with_prompt("Switch vendor")
        .items(vendor_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let vendor = vendor_choices
        .get(vendor_selection)
        .copied()
        .unwrap_or("cisco")
        .to_owned();

    // 6. Password + storage choice
    let password = rpassword::prompt_password("SSH password: ").map_err(prompt_err)?;
    if password.trim().is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let password_field = if store_selection == 0 {
        let entry = keyring::Entry::new("mrv", &format!("{profile_name}/password"))
            .map_err(keyring_err)?;
        entry.set_password(&password).map_err(keyring_err)?;
        eprintln!("  Password stored in system keyring");
        None // Don't write to config file
    } else {
        Some(password)
    };

    // 7. Polling interval
    let interval_input: String = Input::new()
        .with_prompt("Polling interval in seconds (0 = run once)")
        .default("0".into())
        .validate_with(|v: &String| validate_interval(v))
        .interact_text()
        .map_err(prompt_err)?;
    let interval: u64 = interval_input.trim().parse().unwrap_or(0);

    // 8. Persist
    let mut cfg = mrv_config::load_config_or_default();
    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            host,
            port,
            username: Some(username),
            password: password_field,
            password_env: None,
            vendor,
            interval,
            timeout: None,
        },
    );
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }
    save(&cfg)?;

    eprintln!("\nProfile '{profile_name}' saved to {}", config_path.display());
    eprintln!("Try: mrv check --profile {profile_name}");
    Ok(())
}

fn save(cfg: &Config) -> Result<(), CliError> {
    mrv_config::save_config(cfg).map_err(CliError::from)
}
