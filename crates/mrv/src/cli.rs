//! Clap derive structures for the `mrv` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Kept free of workspace-internal types so build.rs can compile it
//! standalone for man-page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mrv -- multicast route validator for network switches
#[derive(Debug, Parser)]
#[command(
    name = "mrv",
    version,
    about = "Validate multicast health on network switches over SSH",
    long_about = "Polls a switch over SSH for IGMP querier status, group membership,\n\
        and multicast routes, then classifies the output against flood and\n\
        querier heuristics. Supports Cisco and Netgear command dialects.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch profile to use
    #[arg(long, short = 'p', env = "MRV_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Switch hostname or IP (overrides profile)
    #[arg(long, env = "MRV_HOST", global = true)]
    pub host: Option<String>,

    /// SSH port
    #[arg(long, env = "MRV_PORT", global = true)]
    pub port: Option<u16>,

    /// SSH username
    #[arg(long, short = 'u', env = "MRV_USERNAME", global = true)]
    pub username: Option<String>,

    /// Switch vendor (cisco, netgear)
    #[arg(long, env = "MRV_VENDOR", global = true)]
    pub vendor: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MRV_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Per-command timeout in seconds
    #[arg(long, env = "MRV_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one check per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one validation cycle and print the report
    #[command(alias = "c")]
    Check(CheckArgs),

    /// Poll continuously at a fixed interval until interrupted
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Check / Watch ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CheckArgs {}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between validation cycles (0 = run once)
    #[arg(long, short = 'i', env = "MRV_INTERVAL")]
    pub interval: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive wizard: create or update a profile
    Init,

    /// Print the effective configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,

    /// Store a profile's SSH password in the system keyring
    SetPassword {
        /// Profile to store the password for
        #[arg(long, short = 'p')]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
