//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders validation reports in the format selected by `--output`.
//! Table uses `tabled`, structured formats use serde, plain emits one
//! check per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use mrv_core::{CheckKind, CheckResult, ReportSink, ValidationReport, Verdict};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    check: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Result")]
    result: String,
}

fn check_label(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::Querier => "Querier",
        CheckKind::FloodDetection => "Flood Detection",
        CheckKind::GroupMembership => "IGMP Groups",
    }
}

/// The result-column text for a passing check, matching the wording
/// operators already know from the report table.
fn ok_label(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::Querier => "OK",
        CheckKind::FloodDetection => "no flood",
        CheckKind::GroupMembership => "groups retrieved",
    }
}

fn status_label(verdict: &Verdict, color: bool) -> String {
    match verdict {
        Verdict::Ok => {
            if color {
                "OK".green().to_string()
            } else {
                "OK".into()
            }
        }
        Verdict::Warning(_) => {
            if color {
                "WARN".yellow().to_string()
            } else {
                "WARN".into()
            }
        }
        Verdict::Unknown(_) => {
            if color {
                "UNKNOWN".dimmed().to_string()
            } else {
                "UNKNOWN".into()
            }
        }
    }
}

fn result_label(check: &CheckResult) -> String {
    check
        .verdict
        .reason()
        .map_or_else(|| ok_label(check.check).to_owned(), str::to_owned)
}

// ── Report renderers ─────────────────────────────────────────────────

/// Render a report in the chosen format.
pub fn render_report(format: &OutputFormat, color: bool, report: &ValidationReport) -> String {
    match format {
        OutputFormat::Table => render_table(report, color),
        OutputFormat::Json => render_json(report, false),
        OutputFormat::JsonCompact => render_json(report, true),
        OutputFormat::Yaml => render_yaml(report),
        OutputFormat::Plain => render_plain(report),
    }
}

fn render_table(report: &ValidationReport, color: bool) -> String {
    let rows: Vec<CheckRow> = report
        .checks
        .iter()
        .map(|c| CheckRow {
            check: check_label(c.check).to_owned(),
            status: status_label(&c.verdict, color),
            result: result_label(c),
        })
        .collect();

    let title = format!(
        "Multicast validation — {} ({}) at {}",
        report.host,
        report.vendor,
        report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{title}\n{table}")
}

fn render_json(report: &ValidationReport, compact: bool) -> String {
    if compact {
        serde_json::to_string(report).expect("serialization should not fail")
    } else {
        serde_json::to_string_pretty(report).expect("serialization should not fail")
    }
}

fn render_yaml(report: &ValidationReport) -> String {
    serde_yaml::to_string(report).expect("serialization should not fail")
}

fn render_plain(report: &ValidationReport) -> String {
    report
        .checks
        .iter()
        .map(|c| {
            let status = match &c.verdict {
                Verdict::Ok => "ok".to_owned(),
                Verdict::Warning(reason) => format!("warning:{reason}"),
                Verdict::Unknown(reason) => format!("unknown:{reason}"),
            };
            format!("{}={status}", c.check)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Console sink ─────────────────────────────────────────────────────

/// [`ReportSink`] that renders each report straight to stdout.
pub struct ConsoleSink {
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            format: global.output.clone(),
            color: should_color(&global.color),
            quiet: global.quiet,
        }
    }
}

impl ReportSink for ConsoleSink {
    fn emit(&mut self, report: &ValidationReport) {
        let out = render_report(&self.format, self.color, report);
        print_output(&out, self.quiet);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mrv_core::{Snapshot, QueryKind, Vendor, classify};

    use super::*;

    fn sample_report() -> ValidationReport {
        let snapshot = Snapshot::new()
            .with(QueryKind::QuerierStatus, "No Querier Present")
            .with(QueryKind::GroupMembership, "239.1.1.1  eth0");
        ValidationReport::new("sw1", Vendor::Cisco, classify(&snapshot))
    }

    #[test]
    fn plain_output_is_one_check_per_line() {
        let out = render_plain(&sample_report());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "querier=warning:no active querier",
                "flood-detection=ok",
                "group-membership=ok",
            ]
        );
    }

    #[test]
    fn table_output_names_the_device() {
        let out = render_table(&sample_report(), false);
        assert!(out.contains("sw1"));
        assert!(out.contains("cisco"));
        assert!(out.contains("Flood Detection"));
        assert!(out.contains("no active querier"));
    }

    #[test]
    fn json_output_round_trips() {
        let report = sample_report();
        let out = render_json(&report, true);
        let parsed: ValidationReport = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, report);
    }
}
