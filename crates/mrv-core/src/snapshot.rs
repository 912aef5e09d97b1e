// ── Snapshot of one device poll ──

use serde::{Deserialize, Serialize};

use crate::vendor::QueryKind;

/// The raw output of all multicast queries against a device at one
/// point in time.
///
/// An absent entry means the command failed or produced no output.
/// Created fresh each poll cycle, immutable once handed to the
/// classifier, and discarded after classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    group_membership: Option<String>,
    querier_status: Option<String>,
    multicast_routes: Option<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style entry insertion; used by the handler and by tests
    /// constructing fixture snapshots.
    pub fn with(mut self, kind: QueryKind, text: impl Into<String>) -> Self {
        self.record(kind, text.into());
        self
    }

    /// Record the output of one query.
    pub fn record(&mut self, kind: QueryKind, text: String) {
        match kind {
            QueryKind::GroupMembership => self.group_membership = Some(text),
            QueryKind::QuerierStatus => self.querier_status = Some(text),
            QueryKind::MulticastRoutes => self.multicast_routes = Some(text),
        }
    }

    /// The raw text for a query, if the command succeeded.
    pub fn get(&self, kind: QueryKind) -> Option<&str> {
        match kind {
            QueryKind::GroupMembership => self.group_membership.as_deref(),
            QueryKind::QuerierStatus => self.querier_status.as_deref(),
            QueryKind::MulticastRoutes => self.multicast_routes.as_deref(),
        }
    }

    /// Number of queries that produced output.
    pub fn populated(&self) -> usize {
        QueryKind::FETCH_ORDER
            .iter()
            .filter(|kind| self.get(**kind).is_some())
            .count()
    }
}
