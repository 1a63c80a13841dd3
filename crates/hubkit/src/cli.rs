//! Clap derive structures for the `hubkit` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hubkit -- hub serial assignment and customer address export
#[derive(Debug, Parser)]
#[command(
    name = "hubkit",
    version,
    about = "Assign hub serial numbers and export customer addresses",
    long_about = "Two pipelines in one tool.\n\n\
        `hubs assign` orders Internet hubs by the trailing digit of their id\n\
        and hands out descending serial numbers.\n\
        `addresses export` pulls every customer address from the inventory\n\
        service, validates it, and writes a CSV file.",
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
    /// Config file to read instead of the platform default
    #[arg(long, env = "HUBKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Inventory service base URL (overrides config)
    #[arg(long, env = "HUBKIT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Inventory service API key
    #[arg(long, env = "HUBKIT_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HUBKIT_FORMAT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "HUBKIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "HUBKIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enums ─────────────────────────────────────────────────────

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
    /// Plain text, one value per line (scripting)
    Plain,
}

/// Which half of a reassignment to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Show {
    /// Both `original` and `updated`
    Both,
    /// The input as it was before reassignment
    Original,
    /// The reordered, renumbered hubs
    Updated,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reorder hubs and assign serial numbers
    #[command(alias = "h")]
    Hubs(HubsArgs),

    /// Fetch and export customer addresses
    #[command(alias = "addr", alias = "a")]
    Addresses(AddressesArgs),

    /// Inspect and create configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Hubs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HubsArgs {
    #[command(subcommand)]
    pub command: HubsCommand,
}

#[derive(Debug, Subcommand)]
pub enum HubsCommand {
    /// Assign serial numbers to an Internet_hubs JSON payload
    Assign(AssignArgs),
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    /// JSON file with an `Internet_hubs` array (`-` for stdin)
    pub input: PathBuf,

    /// Serial number prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Highest serial suffix, handed to the first hub
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Hub id that keeps its serial number
    #[arg(long)]
    pub sentinel: Option<String>,

    /// Reject hub ids that do not end in a digit
    #[arg(long)]
    pub strict: bool,

    /// Which half of the result to print
    #[arg(long, default_value = "both")]
    pub show: Show,
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// Fetch every customer address and write a CSV file
    Export(ExportArgs),

    /// Print the number of customers known to the service
    Count,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// CSV file to write (overrides config `export_path`)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration (API key masked)
    Show,

    /// Print the config file location
    Path,

    /// Write a starter config file (records --base-url when given)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
