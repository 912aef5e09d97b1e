// ── Device handler ──
//
// Binds a vendor's command set to an injected session and turns one
// round of queries into a Snapshot. A pure remote-call shim: no retry
// policy (that belongs to the poller), no classification.

use mrv_session::DeviceSession;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::snapshot::Snapshot;
use crate::vendor::{CommandSet, QueryKind, Vendor};

/// Fetches multicast status from a single device.
pub struct DeviceHandler<S> {
    session: S,
    commands: CommandSet,
    host: String,
    vendor: Vendor,
}

impl<S: DeviceSession> DeviceHandler<S> {
    pub fn new(
        session: S,
        commands: CommandSet,
        host: impl Into<String>,
        vendor: Vendor,
    ) -> Self {
        Self {
            session,
            commands,
            host: host.into(),
            vendor,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Execute every query kind in fixed order and collect a snapshot.
    ///
    /// A failing command downgrades its entry to absent -- partial data
    /// must still be classifiable (missing routes must not block the
    /// querier verdict). Only a fatal session error aborts the fetch;
    /// the caller must reconnect before retrying.
    pub async fn fetch_multicast_info(&mut self) -> Result<Snapshot, CoreError> {
        let mut snapshot = Snapshot::new();

        for kind in QueryKind::FETCH_ORDER {
            let command = self.commands.command_for(kind);
            match self.session.execute(command).await {
                Ok(output) if output.is_empty() => {
                    debug!(host = %self.host, query = %kind, "command produced no output");
                }
                Ok(output) => snapshot.record(kind, output),
                Err(e) if e.is_fatal() => {
                    warn!(host = %self.host, query = %kind, error = %e, "session failed during fetch");
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(
                        host = %self.host,
                        query = %kind,
                        error = %e,
                        "command failed; continuing with partial data"
                    );
                }
            }
        }

        debug!(
            host = %self.host,
            populated = snapshot.populated(),
            "snapshot collected"
        );

        Ok(snapshot)
    }

    /// Release the underlying session.
    pub async fn release(&mut self) -> Result<(), CoreError> {
        self.session.close().await.map_err(CoreError::from)
    }
}
