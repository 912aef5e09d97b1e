// ── Vendors, query kinds, and the command registry ──
//
// Maps a logical multicast query to the literal CLI command a vendor's
// switch understands. Adding a vendor is one new `CommandSet` entry in
// `CommandRegistry::builtin` -- classifier and poller are untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;

// ── Vendor ──────────────────────────────────────────────────────────

/// Switch vendor. Selected once at configuration time; only role at
/// runtime is choosing the command set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Cisco,
    Netgear,
}

// ── QueryKind ───────────────────────────────────────────────────────

/// The three multicast status queries issued against every device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    GroupMembership,
    QuerierStatus,
    MulticastRoutes,
}

impl QueryKind {
    /// Fixed fetch order. Correctness does not depend on it (the snapshot
    /// is a mapping), but a deterministic order keeps logs and tests
    /// reproducible.
    pub const FETCH_ORDER: [QueryKind; 3] = [
        QueryKind::GroupMembership,
        QueryKind::QuerierStatus,
        QueryKind::MulticastRoutes,
    ];
}

// ── CommandSet ──────────────────────────────────────────────────────

/// One vendor's command strings, one per [`QueryKind`].
///
/// Completeness is enforced by construction: every field is mandatory,
/// so a registered vendor can never be missing a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    pub group_membership: String,
    pub querier_status: String,
    pub multicast_routes: String,
}

impl CommandSet {
    /// The literal command for a query kind.
    pub fn command_for(&self, kind: QueryKind) -> &str {
        match kind {
            QueryKind::GroupMembership => &self.group_membership,
            QueryKind::QuerierStatus => &self.querier_status,
            QueryKind::MulticastRoutes => &self.multicast_routes,
        }
    }
}

// ── CommandRegistry ─────────────────────────────────────────────────

/// Vendor → command-set lookup.
///
/// Built once at startup and passed by reference afterwards; it is never
/// mutated at runtime, so any number of concurrent pollers can share it
/// without synchronization.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    sets: HashMap<Vendor, CommandSet>,
}

impl CommandRegistry {
    /// An empty registry. Useful for tests and bespoke deployments.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in registry covering all supported vendors.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            Vendor::Cisco,
            CommandSet {
                group_membership: "show ip igmp groups".into(),
                querier_status: "show ip igmp snooping querier".into(),
                multicast_routes: "show ip mroute".into(),
            },
        );
        registry.register(
            Vendor::Netgear,
            CommandSet {
                group_membership: "show igmp group".into(),
                querier_status: "show igmp querier".into(),
                multicast_routes: "show ip mroute".into(),
            },
        );
        registry
    }

    /// Register a command set for a vendor, replacing any existing one.
    /// Intended for startup-time construction only.
    pub fn register(&mut self, vendor: Vendor, set: CommandSet) {
        self.sets.insert(vendor, set);
    }

    /// Look up the command set for a vendor.
    pub fn commands_for(&self, vendor: Vendor) -> Result<&CommandSet, CoreError> {
        self.sets.get(&vendor).ok_or_else(|| CoreError::UnknownVendor {
            vendor: vendor.to_string(),
        })
    }

    /// Vendors with a registered command set.
    pub fn vendors(&self) -> impl Iterator<Item = Vendor> + '_ {
        self.sets.keys().copied()
    }
}
