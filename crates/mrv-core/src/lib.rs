// mrv-core: Multicast validation pipeline between mrv-session and consumers (CLI).

pub mod classify;
pub mod config;
pub mod error;
pub mod handler;
pub mod poller;
pub mod report;
pub mod snapshot;
pub mod vendor;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{CHECK_ORDER, CheckKind, CheckResult, Verdict, classify};
pub use config::DeviceConfig;
pub use error::CoreError;
pub use handler::DeviceHandler;
pub use poller::Poller;
pub use report::{ReportSink, ValidationReport};
pub use snapshot::Snapshot;
pub use vendor::{CommandRegistry, CommandSet, QueryKind, Vendor};
