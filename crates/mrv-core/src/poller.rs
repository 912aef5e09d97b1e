// ── Polling loop ──
//
// Drives fetch → classify → emit cycles against one device. Owns the
// handler (and through it the session) for the duration of the run and
// releases the session exactly once on every exit path.

use std::time::Duration;

use mrv_session::DeviceSession;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::classify::classify;
use crate::error::CoreError;
use crate::handler::DeviceHandler;
use crate::report::{ReportSink, ValidationReport};

/// Repeated (or single-shot) validation of one device.
///
/// Interval semantics: `0` runs exactly one cycle and terminates;
/// anything greater loops until cancellation or a fatal session error.
/// One session is opened before the run and reused across cycles --
/// handlers never reconnect internally.
pub struct Poller<S> {
    handler: DeviceHandler<S>,
    interval: Duration,
    cancel: CancellationToken,
}

impl<S: DeviceSession> Poller<S> {
    pub fn new(handler: DeviceHandler<S>, interval_secs: u64, cancel: CancellationToken) -> Self {
        Self {
            handler,
            interval: Duration::from_secs(interval_secs),
            cancel,
        }
    }

    /// Run the polling loop to completion, emitting each cycle's report
    /// into `sink`.
    ///
    /// The session is released exactly once on every path: normal
    /// single-shot completion, cancellation, and fatal session error.
    /// Cancellation is observed during the inter-cycle sleep, so a long
    /// interval never delays shutdown.
    pub async fn run(mut self, sink: &mut dyn ReportSink) -> Result<(), CoreError> {
        let outcome = self.run_cycles(sink).await;

        if let Err(e) = self.handler.release().await {
            // The run outcome (fatal error or clean stop) is what the
            // caller needs to see; a failed release only gets logged.
            warn!(host = %self.handler.host(), error = %e, "failed to release device session");
        }

        outcome
    }

    async fn run_cycles(&mut self, sink: &mut dyn ReportSink) -> Result<(), CoreError> {
        loop {
            info!(host = %self.handler.host(), "running multicast validation");

            // Partial fetches still classify; only a fatal session error
            // escapes and ends the run.
            let snapshot = self.handler.fetch_multicast_info().await?;
            let checks = classify(&snapshot);
            let report =
                ValidationReport::new(self.handler.host(), self.handler.vendor(), checks);
            sink.emit(&report);

            if self.interval.is_zero() {
                return Ok(());
            }

            tokio::select! {
                () = self.cancel.cancelled() => {
                    info!(host = %self.handler.host(), "polling cancelled");
                    return Ok(());
                }
                () = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
