// SSH device session over russh.
//
// One session maps to one SSH connection. Commands run one at a time
// through short-lived exec channels -- network switch shells are not
// safe to drive concurrently, so `execute` takes `&mut self` and the
// type system enforces sequential use.

use std::time::Duration;

use async_trait::async_trait;
use russh::client;
use russh::{ChannelMsg, Disconnect};
use russh_keys::key;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::Error;
use crate::transport::TransportConfig;

// ── DeviceSession contract ──────────────────────────────────────────

/// A remote shell session that executes commands against one device.
///
/// Implementations must be driven sequentially: a command completes
/// before the next is issued (`&mut self` encodes this). Consumers hold
/// a session for the lifetime of a polling run and release it exactly
/// once via [`close`](DeviceSession::close).
#[async_trait]
pub trait DeviceSession: Send {
    /// Execute a single command and return its raw textual output.
    ///
    /// Errors where [`Error::is_fatal`] is `false` leave the session
    /// usable; fatal errors mean the caller must reconnect.
    async fn execute(&mut self, command: &str) -> Result<String, Error>;

    /// Release the session. Idempotent at the protocol level, but callers
    /// are expected to invoke it exactly once.
    async fn close(&mut self) -> Result<(), Error>;
}

// ── Reachability probe ──────────────────────────────────────────────

/// Pre-flight TCP probe: can we open a socket to `host:port` at all?
///
/// Run before the (slower) SSH handshake so obviously-dead endpoints
/// fail fast with a clear message.
pub async fn probe_reachable(host: &str, port: u16, timeout: Duration) -> Result<(), Error> {
    let attempt = tokio::net::TcpStream::connect((host, port));
    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(Error::Unreachable {
            host: host.to_owned(),
            port,
            reason: e.to_string(),
        }),
        Err(_elapsed) => Err(Error::Unreachable {
            host: host.to_owned(),
            port,
            reason: format!("no response within {}s", timeout.as_secs()),
        }),
    }
}

// ── russh handler ───────────────────────────────────────────────────

/// Client handler that accepts any host key.
///
/// Switch fleets rarely have stable, pre-distributed host keys; the
/// original workflow (interactive netmiko-style polling) never pinned
/// them either. Known-hosts verification can be layered in later.
struct AcceptingHandler;

#[async_trait]
impl client::Handler for AcceptingHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

// ── SshSession ──────────────────────────────────────────────────────

/// Concrete [`DeviceSession`] over an authenticated SSH connection.
pub struct SshSession {
    handle: client::Handle<AcceptingHandler>,
    host: String,
    command_timeout: Duration,
    closed: bool,
}

impl SshSession {
    /// Open and authenticate a session against `host:port`.
    ///
    /// Performs the TCP connect, SSH handshake, and password auth inside
    /// the transport's connect timeout. Fails with
    /// [`Error::Authentication`] if the device rejects the credentials.
    pub async fn open(
        host: &str,
        port: u16,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = transport.build_client_config();

        debug!(host, port, username, "opening SSH session");

        let connect = client::connect(config, (host, port), AcceptingHandler);
        let mut handle = match tokio::time::timeout(transport.connect_timeout, connect).await {
            Ok(Ok(handle)) => handle,
            Ok(Err(e)) => {
                return Err(Error::Connection {
                    host: host.to_owned(),
                    port,
                    reason: e.to_string(),
                });
            }
            Err(_elapsed) => {
                return Err(Error::ConnectTimeout {
                    host: host.to_owned(),
                    port,
                    timeout_secs: transport.connect_timeout.as_secs(),
                });
            }
        };

        let authenticated = handle
            .authenticate_password(username, password.expose_secret())
            .await?;
        if !authenticated {
            return Err(Error::Authentication {
                username: username.to_owned(),
                host: host.to_owned(),
            });
        }

        debug!(host, port, "SSH session established");

        Ok(Self {
            handle,
            host: host.to_owned(),
            command_timeout: transport.command_timeout,
            closed: false,
        })
    }

    /// The hostname this session is connected to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Run one command on a fresh exec channel, collecting stdout until
    /// the channel closes.
    async fn exec_once(&mut self, command: &str) -> Result<String, Error> {
        let mut channel = self.handle.channel_open_session().await?;
        channel.exec(true, command).await?;

        let mut stdout: Vec<u8> = Vec::new();
        let mut stderr: Vec<u8> = Vec::new();
        let mut exit_status: Option<u32> = None;

        loop {
            let Some(msg) = channel.wait().await else {
                break;
            };
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, .. } => stderr.extend_from_slice(data),
                ChannelMsg::ExitStatus { exit_status: code } => {
                    // More data may still arrive after the status message.
                    exit_status = Some(code);
                }
                _ => {}
            }
        }

        if !stderr.is_empty() {
            debug!(
                host = %self.host,
                command,
                stderr = %String::from_utf8_lossy(&stderr),
                "command produced stderr output"
            );
        }

        let output = String::from_utf8_lossy(&stdout).into_owned();

        // Nonzero exit with no output is a rejected command; nonzero exit
        // with output still counts -- switch CLIs are inconsistent here.
        if let Some(code) = exit_status {
            if code != 0 && output.trim().is_empty() {
                return Err(Error::CommandFailed {
                    command: command.to_owned(),
                    exit_status: code,
                });
            }
        }

        Ok(output)
    }
}

#[async_trait]
impl DeviceSession for SshSession {
    async fn execute(&mut self, command: &str) -> Result<String, Error> {
        if self.closed {
            return Err(Error::SessionClosed);
        }

        debug!(host = %self.host, command, "executing command");

        match tokio::time::timeout(self.command_timeout, self.exec_once(command)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(Error::CommandTimeout {
                command: command.to_owned(),
                timeout_secs: self.command_timeout.as_secs(),
            }),
        }
    }

    async fn close(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        debug!(host = %self.host, "closing SSH session");

        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            // The peer may already have dropped the connection; that is
            // not worth surfacing to the caller on a deliberate close.
            warn!(host = %self.host, error = %e, "disconnect was not clean");
        }
        Ok(())
    }
}
