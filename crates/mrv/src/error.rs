//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use mrv_config::ConfigError;
use mrv_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to switch at {host}")]
    #[diagnostic(
        code(mrv::connection_failed),
        help(
            "Check that the switch is powered, reachable, and accepting SSH.\n\
             Host: {host}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("Session to switch was lost")]
    #[diagnostic(
        code(mrv::session_lost),
        help("The SSH session broke mid-run: {reason}\nReconnect and try again.")
    )]
    SessionLost { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for {username}@{host}")]
    #[diagnostic(
        code(mrv::auth_failed),
        help(
            "Verify the SSH username and password for this switch.\n\
             Store a password with: mrv config set-password"
        )
    )]
    AuthFailed { username: String, host: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(mrv::no_credentials),
        help(
            "Configure credentials with: mrv config init\n\
             Or set the MRV_USERNAME and MRV_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(mrv::validation))]
    Validation { field: String, reason: String },

    #[error("Vendor '{vendor}' has no registered command set")]
    #[diagnostic(
        code(mrv::unknown_vendor),
        help("Supported vendors: cisco, netgear")
    )]
    UnknownVendor { vendor: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(mrv::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: mrv config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No switch configured")]
    #[diagnostic(
        code(mrv::no_config),
        help(
            "Pass --host/--username/--vendor, or create a profile with: mrv config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Timed out after {seconds}s talking to {host}")]
    #[diagnostic(
        code(mrv::timeout),
        help("Increase the timeout with --timeout or check switch responsiveness.")
    )]
    Timeout { host: String, seconds: u64 },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(mrv::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::SessionLost { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::UnknownVendor { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownVendor { vendor } => CliError::UnknownVendor { vendor },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::ConnectionFailed { host, reason } => {
                CliError::ConnectionFailed { host, reason }
            }

            CoreError::AuthenticationFailed { username, host } => {
                CliError::AuthFailed { username, host }
            }

            CoreError::Timeout { host, timeout_secs } => CliError::Timeout {
                host,
                seconds: timeout_secs,
            },

            CoreError::SessionLost { reason } => CliError::SessionLost { reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
