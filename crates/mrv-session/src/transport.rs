// Shared transport tuning for building russh client configurations.
//
// Connection and per-command timeouts live here so the CLI and any
// future consumers agree on one set of knobs, without reaching into
// russh's own config type.

use std::sync::Arc;
use std::time::Duration;

use russh::client;

/// Transport tuning for an SSH device session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Maximum time to establish TCP + SSH handshake + auth.
    pub connect_timeout: Duration,
    /// Maximum time a single command may run before being abandoned.
    pub command_timeout: Duration,
    /// SSH keepalive interval; `None` disables keepalives.
    pub keepalive_interval: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(30),
            keepalive_interval: Some(Duration::from_secs(15)),
        }
    }
}

impl TransportConfig {
    /// Create a config with a specific per-command timeout.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Build the russh client configuration from this config.
    pub(crate) fn build_client_config(&self) -> Arc<client::Config> {
        Arc::new(client::Config {
            keepalive_interval: self.keepalive_interval,
            ..client::Config::default()
        })
    }
}
