//! `mrv watch`: continuous polling until Ctrl-C or a fatal session error.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{GlobalOpts, WatchArgs};
use crate::config;
use crate::error::CliError;

/// Interval used when neither the flag nor the profile specifies one.
const DEFAULT_INTERVAL_SECS: u64 = 60;

pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut device = config::resolve_device_config(global, args.interval)?;

    // Watch means "keep going": a profile without an interval still polls.
    // An explicit `--interval 0` is honored and behaves like `check`.
    if args.interval.is_none() && device.interval_secs == 0 {
        device.interval_secs = DEFAULT_INTERVAL_SECS;
    }

    // Ctrl-C cancels the poller; cancellation is observed even inside
    // the inter-cycle sleep, so shutdown is immediate.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received; stopping after session release");
            signal_cancel.cancel();
        }
    });

    if !global.quiet {
        eprintln!(
            "Watching {} every {}s — Ctrl-C to stop",
            device.host, device.interval_secs
        );
    }

    super::run_validation(device, global, cancel).await
}
