// ── Heuristic classification of a multicast snapshot ──
//
// Pure text heuristics over captured command output. The substring
// markers are vendor-output-format dependent and deliberately kept
// exactly as the field-proven originals; they are not a protocol parser.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::snapshot::Snapshot;
use crate::vendor::QueryKind;

/// Literal marker for unresolved `(*,G)` entries in the mroute table,
/// read here as a sign of flooded groups.
const FLOOD_MARKER: &str = "(*,G)";

// ── Check identity ──────────────────────────────────────────────────

/// The checks evaluated against every snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Querier,
    FloodDetection,
    GroupMembership,
}

/// Fixed evaluation order. Reports list checks in exactly this order,
/// stable across runs for the same snapshot.
pub const CHECK_ORDER: [CheckKind; 3] = [
    CheckKind::Querier,
    CheckKind::FloodDetection,
    CheckKind::GroupMembership,
];

// ── Verdict ─────────────────────────────────────────────────────────

/// Outcome of a single check.
///
/// `Unknown` is not an error -- it records that the snapshot held too
/// little evidence to judge, and is always surfaced in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Ok,
    Warning(String),
    Unknown(String),
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, Verdict::Ok)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Verdict::Warning(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Verdict::Unknown(_))
    }

    /// The reason text for warning/unknown verdicts.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Ok => None,
            Verdict::Warning(reason) | Verdict::Unknown(reason) => Some(reason),
        }
    }
}

// ── CheckResult ─────────────────────────────────────────────────────

/// One check's outcome plus the raw text it judged, when any existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub verdict: Verdict,
    pub evidence: Option<String>,
}

// ── Classifier ──────────────────────────────────────────────────────

/// Classify a snapshot into an ordered list of check results.
///
/// Pure function of the snapshot: no clocks, no configuration, no state.
/// Calling it twice on the same snapshot yields identical results.
pub fn classify(snapshot: &Snapshot) -> Vec<CheckResult> {
    CHECK_ORDER
        .iter()
        .map(|check| match check {
            CheckKind::Querier => check_querier(snapshot),
            CheckKind::FloodDetection => check_flood(snapshot),
            CheckKind::GroupMembership => check_group_membership(snapshot),
        })
        .collect()
}

/// Querier presence and duplicate-querier detection.
///
/// Substring matches are evaluated in a fixed order and the first match
/// wins: output containing both "no querier" and "multiple" resolves to
/// "no active querier". That mirrors the field-proven behavior; it is
/// arguable, but changing it would reclassify existing fleets.
fn check_querier(snapshot: &Snapshot) -> CheckResult {
    let Some(text) = snapshot.get(QueryKind::QuerierStatus) else {
        return CheckResult {
            check: CheckKind::Querier,
            verdict: Verdict::Unknown("no querier data".into()),
            evidence: None,
        };
    };

    let lower = text.to_lowercase();
    let verdict = if lower.contains("no querier") {
        Verdict::Warning("no active querier".into())
    } else if lower.contains("multiple") {
        Verdict::Warning("multiple queriers detected".into())
    } else {
        Verdict::Ok
    };

    CheckResult {
        check: CheckKind::Querier,
        verdict,
        evidence: Some(text.to_owned()),
    }
}

/// Flood detection over the mroute table.
///
/// Absent route data is `Ok`, not `Unknown` -- missing evidence is not
/// itself a flood signal. This is deliberately asymmetric with the
/// querier check, where absence downgrades to `Unknown`.
fn check_flood(snapshot: &Snapshot) -> CheckResult {
    let routes = snapshot.get(QueryKind::MulticastRoutes);

    let verdict = match routes {
        Some(text) if text.contains(FLOOD_MARKER) => {
            Verdict::Warning("flooded groups detected".into())
        }
        _ => Verdict::Ok,
    };

    CheckResult {
        check: CheckKind::FloodDetection,
        verdict,
        evidence: routes.map(str::to_owned),
    }
}

/// Group membership: did the device report any IGMP groups at all?
fn check_group_membership(snapshot: &Snapshot) -> CheckResult {
    let groups = snapshot.get(QueryKind::GroupMembership);

    let verdict = match groups {
        Some(text) if !text.trim().is_empty() => Verdict::Ok,
        _ => Verdict::Unknown("no groups detected".into()),
    };

    CheckResult {
        check: CheckKind::GroupMembership,
        verdict,
        evidence: groups.map(str::to_owned),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn verdicts(results: &[CheckResult]) -> Vec<&Verdict> {
        results.iter().map(|r| &r.verdict).collect()
    }

    #[test]
    fn missing_querier_with_no_other_data() {
        let snapshot =
            Snapshot::new().with(QueryKind::QuerierStatus, "No Querier Present");

        let results = classify(&snapshot);

        assert_eq!(
            verdicts(&results),
            vec![
                &Verdict::Warning("no active querier".into()),
                &Verdict::Ok,
                &Verdict::Unknown("no groups detected".into()),
            ]
        );
    }

    #[test]
    fn healthy_querier_with_flooded_routes() {
        let snapshot = Snapshot::new()
            .with(QueryKind::QuerierStatus, "OK")
            .with(QueryKind::MulticastRoutes, "(*,G) 10.0.0.1")
            .with(QueryKind::GroupMembership, "239.1.1.1  eth0");

        let results = classify(&snapshot);

        assert_eq!(
            verdicts(&results),
            vec![
                &Verdict::Ok,
                &Verdict::Warning("flooded groups detected".into()),
                &Verdict::Ok,
            ]
        );
    }

    #[test]
    fn empty_snapshot_with_blank_group_output() {
        let snapshot = Snapshot::new().with(QueryKind::GroupMembership, "");

        let results = classify(&snapshot);

        assert_eq!(
            verdicts(&results),
            vec![
                &Verdict::Unknown("no querier data".into()),
                &Verdict::Ok,
                &Verdict::Unknown("no groups detected".into()),
            ]
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let snapshot = Snapshot::new()
            .with(QueryKind::QuerierStatus, "Multiple queriers on vlan 10")
            .with(QueryKind::MulticastRoutes, "(S,G) 10.1.1.1, 239.0.0.1");

        let first = classify(&snapshot);
        let second = classify(&snapshot);

        assert_eq!(first, second);
    }

    #[test]
    fn report_order_is_fixed() {
        let results = classify(&Snapshot::new());
        let kinds: Vec<CheckKind> = results.iter().map(|r| r.check).collect();
        assert_eq!(kinds, CHECK_ORDER.to_vec());
    }

    #[test]
    fn querier_substring_tiebreak_prefers_no_querier() {
        // Output matching both markers resolves via the fixed check order.
        let snapshot = Snapshot::new().with(
            QueryKind::QuerierStatus,
            "no querier elected; multiple candidates seen",
        );

        let results = classify(&snapshot);

        assert_eq!(
            results[0].verdict,
            Verdict::Warning("no active querier".into())
        );
    }

    #[test]
    fn querier_matching_is_case_insensitive() {
        let snapshot = Snapshot::new().with(QueryKind::QuerierStatus, "MULTIPLE QUERIERS");
        let results = classify(&snapshot);
        assert_eq!(
            results[0].verdict,
            Verdict::Warning("multiple queriers detected".into())
        );
    }

    #[test]
    fn absent_routes_are_not_a_flood_signal() {
        // Asymmetry with the querier check: absence of route data stays Ok.
        let results = classify(&Snapshot::new());
        assert_eq!(results[0].verdict, Verdict::Unknown("no querier data".into()));
        assert_eq!(results[1].verdict, Verdict::Ok);
    }

    #[test]
    fn whitespace_only_groups_count_as_none() {
        let snapshot = Snapshot::new().with(QueryKind::GroupMembership, "   \n\t  ");
        let results = classify(&snapshot);
        assert_eq!(
            results[2].verdict,
            Verdict::Unknown("no groups detected".into())
        );
    }

    #[test]
    fn evidence_carries_the_raw_text() {
        let snapshot = Snapshot::new()
            .with(QueryKind::QuerierStatus, "OK")
            .with(QueryKind::MulticastRoutes, "(*,G) 10.0.0.1");

        let results = classify(&snapshot);

        assert_eq!(results[0].evidence.as_deref(), Some("OK"));
        assert_eq!(results[1].evidence.as_deref(), Some("(*,G) 10.0.0.1"));
        assert_eq!(results[2].evidence, None);
    }
}
