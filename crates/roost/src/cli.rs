//! Clap derive structures for the `roost` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Also
//! compiled by `build.rs` for man page generation, so nothing here may
//! reach into the rest of the crate.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// roost -- browse and manage apartment listings
#[derive(Debug, Parser)]
#[command(
    name = "roost",
    version,
    about = "Browse and manage apartment listings from the command line",
    long_about = "Lists, creates, edits and removes apartments on a listing service.\n\n\
        The last known listing is cached locally, so `roost list` still shows\n\
        something useful while the service is unreachable.",
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
    /// Service profile to use
    #[arg(long, short = 'p', env = "ROOST_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Listing service base URL (overrides profile)
    #[arg(long, short = 'u', env = "ROOST_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "ROOST_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ROOST_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ROOST_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Neither read nor write the local listing cache
    #[arg(long, env = "ROOST_NO_CACHE", global = true)]
    pub no_cache: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Price order for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Cheapest first
    Asc,
    /// Most expensive first
    Desc,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List apartments, ordered by price
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one apartment in detail
    #[command(alias = "get")]
    Show {
        /// Apartment id
        id: String,
    },

    /// Create a new apartment
    #[command(alias = "create")]
    Add(AddArgs),

    /// Change fields of an existing apartment
    Edit(EditArgs),

    /// Delete an apartment
    #[command(alias = "rm")]
    Remove {
        /// Apartment id
        id: String,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Apartment arguments ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Price order [default: from config, else asc]
    #[arg(long, short = 's')]
    pub sort: Option<SortArg>,

    /// Only apartments with exactly this many rooms (0 = any)
    #[arg(long, short = 'r')]
    pub rooms: Option<i64>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Apartment name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Number of rooms
    #[arg(long, short = 'r', allow_negative_numbers = true)]
    pub rooms: i64,

    /// Price
    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,

    /// Free-form description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Apartment id
    pub id: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New number of rooms
    #[arg(long, short = 'r', allow_negative_numbers = true)]
    pub rooms: Option<i64>,

    /// New price
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the default profile
    SetDefault {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
