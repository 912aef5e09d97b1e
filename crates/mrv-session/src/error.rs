use thiserror::Error;

/// Top-level error type for the `mrv-session` crate.
///
/// Covers every failure mode of the transport layer: reachability,
/// connection, authentication, and per-command execution. `mrv-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Reachability ────────────────────────────────────────────────
    /// Pre-flight TCP probe failed (host down, port filtered, DNS failure).
    #[error("Host {host}:{port} is unreachable: {reason}")]
    Unreachable {
        host: String,
        port: u16,
        reason: String,
    },

    // ── Connection ──────────────────────────────────────────────────
    /// TCP/SSH connection could not be established.
    #[error("Connection failed to {host}:{port}: {reason}")]
    Connection {
        host: String,
        port: u16,
        reason: String,
    },

    /// Connection attempt exceeded the configured timeout.
    #[error("Connection to {host}:{port} timed out after {timeout_secs}s")]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout_secs: u64,
    },

    // ── Authentication ──────────────────────────────────────────────
    /// Password authentication was rejected by the device.
    #[error("Authentication failed for {username}@{host}")]
    Authentication { username: String, host: String },

    // ── Command execution ───────────────────────────────────────────
    /// A single command did not complete within the command timeout.
    /// The session remains usable — the next command opens a fresh channel.
    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimeout {
        command: String,
        timeout_secs: u64,
    },

    /// The device reported a nonzero exit status and produced no output.
    #[error("Command failed on device (exit {exit_status}): {command}")]
    CommandFailed { command: String, exit_status: u32 },

    // ── Session lifecycle ───────────────────────────────────────────
    /// The remote side closed the session underneath us.
    #[error("Session closed by peer")]
    SessionClosed,

    // ── Protocol / IO ───────────────────────────────────────────────
    /// SSH protocol error (key exchange, channel failure, transport loss).
    #[error("SSH protocol error: {0}")]
    Ssh(#[from] russh::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the session is unusable after this error.
    ///
    /// Per-command failures (timeout, nonzero exit) are recoverable — the
    /// caller may keep the session and issue further commands. Everything
    /// else means the transport itself is broken and the caller must
    /// reconnect.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::CommandTimeout { .. } | Self::CommandFailed { .. }
        )
    }

    /// Returns `true` if this is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
