// ── Core error types ──
//
// User-facing errors from mrv-core. These are NOT transport-specific --
// consumers never see SSH channel details directly. The
// `From<mrv_session::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// Only two failure classes cross the core's boundary: a vendor without
/// a registered command set (configuration time) and a fatal session
/// failure (run time). Per-command failures never appear here -- they
/// are absorbed into the [`Snapshot`](crate::Snapshot) as absent entries.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("No command set registered for vendor '{vendor}'")]
    UnknownVendor { vendor: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Session errors (fatal to the current polling run) ────────────
    #[error("Cannot connect to {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Authentication failed for {username}@{host}")]
    AuthenticationFailed { username: String, host: String },

    #[error("Session to {host} timed out after {timeout_secs}s")]
    Timeout { host: String, timeout_secs: u64 },

    #[error("Device session lost: {reason}")]
    SessionLost { reason: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<mrv_session::Error> for CoreError {
    fn from(err: mrv_session::Error) -> Self {
        use mrv_session::Error as SessionError;

        match err {
            SessionError::Unreachable { host, port, reason } => CoreError::ConnectionFailed {
                host: format!("{host}:{port}"),
                reason,
            },
            SessionError::Connection { host, port, reason } => CoreError::ConnectionFailed {
                host: format!("{host}:{port}"),
                reason,
            },
            SessionError::ConnectTimeout {
                host,
                port,
                timeout_secs,
            } => CoreError::Timeout {
                host: format!("{host}:{port}"),
                timeout_secs,
            },
            SessionError::Authentication { username, host } => {
                CoreError::AuthenticationFailed { username, host }
            }
            // Command-level errors are handled inside fetch_multicast_info
            // and normally never reach this conversion; if one does, it is
            // reported as a lost session rather than silently dropped.
            SessionError::CommandTimeout { .. }
            | SessionError::CommandFailed { .. }
            | SessionError::SessionClosed => CoreError::SessionLost {
                reason: err.to_string(),
            },
            SessionError::Ssh(e) => CoreError::SessionLost {
                reason: e.to_string(),
            },
            SessionError::Io(e) => CoreError::SessionLost {
                reason: e.to_string(),
            },
        }
    }
}
