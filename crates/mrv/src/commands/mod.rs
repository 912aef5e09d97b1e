//! Command dispatch: bridges CLI args -> core polling -> output formatting.

pub mod check;
pub mod config_cmd;
pub mod watch;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use mrv_core::{CommandRegistry, CoreError, DeviceConfig, DeviceHandler, Poller};
use mrv_session::{SshSession, TransportConfig, probe_reachable};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::ConsoleSink;

/// How long the pre-flight TCP probe waits before declaring the host dead.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Open a session and drive the polling loop until it finishes.
///
/// Shared by `check` (interval forced to 0) and `watch`. The poller
/// releases the session on every exit path, including Ctrl-C.
pub(crate) async fn run_validation(
    device: DeviceConfig,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    let registry = CommandRegistry::builtin();
    let commands = registry.commands_for(device.vendor)?.clone();

    // Fail fast on dead endpoints before paying for the SSH handshake.
    probe_reachable(&device.host, device.port, PROBE_TIMEOUT)
        .await
        .map_err(CoreError::from)?;

    if !global.quiet {
        eprintln!(
            "Connecting to {}:{} ({}) ...",
            device.host, device.port, device.vendor
        );
    }

    let transport = TransportConfig::default().with_command_timeout(device.command_timeout);
    let session = SshSession::open(
        &device.host,
        device.port,
        &device.username,
        &device.password,
        &transport,
    )
    .await
    .map_err(CoreError::from)?;

    let handler = DeviceHandler::new(session, commands, device.host.clone(), device.vendor);
    let poller = Poller::new(handler, device.interval_secs, cancel);
    let mut sink = ConsoleSink::new(global);

    poller.run(&mut sink).await?;
    Ok(())
}
