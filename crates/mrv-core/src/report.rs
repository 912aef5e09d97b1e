// ── Validation report ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::CheckResult;
use crate::vendor::Vendor;

/// One polling cycle's classified results for one device.
///
/// A value type: built once per cycle, never mutated, handed to the
/// caller's [`ReportSink`] and not retained by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Switch hostname or IP the snapshot was taken from.
    pub host: String,
    pub vendor: Vendor,
    /// When classification completed.
    pub completed_at: DateTime<Utc>,
    /// Check results in fixed evaluation order.
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    /// Build a report from classified results, stamped now.
    pub fn new(host: impl Into<String>, vendor: Vendor, checks: Vec<CheckResult>) -> Self {
        Self {
            host: host.into(),
            vendor,
            completed_at: Utc::now(),
            checks,
        }
    }

    /// `true` if any check produced a warning.
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.verdict.is_warning())
    }

    /// `true` if every check passed cleanly (no warnings, no unknowns).
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.verdict.is_ok())
    }
}

/// Consumer of reports as the poller produces them.
///
/// The core has no formatting opinion -- the CLI renders tables, other
/// callers may write JSON lines or push metrics.
pub trait ReportSink: Send {
    fn emit(&mut self, report: &ValidationReport);
}
