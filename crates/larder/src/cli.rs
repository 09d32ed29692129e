//! Clap derive structures for the `larder` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use larder_core::Category;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// larder -- keep track of what is in the pantry
#[derive(Debug, Parser)]
#[command(
    name = "larder",
    version,
    about = "Track pantry and household inventory from the command line",
    long_about = "A command-line client for a larder inventory backend.\n\n\
        Lists, inspects, adds, edits and removes inventory items, and can\n\
        watch the item list for changes.",
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
    /// Backend base URL (overrides the config file)
    #[arg(long, short = 'u', env = "LARDER_URL", global = true)]
    pub url: Option<String>,

    /// Path to the config file
    #[arg(long, env = "LARDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "LARDER_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

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
    #[arg(long, short = 'k', env = "LARDER_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LARDER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage inventory items
    #[command(alias = "item", alias = "i")]
    Items(ItemsArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Items ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ItemsArgs {
    #[command(subcommand)]
    pub command: ItemsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    /// Show the dashboard: every item in the inventory
    #[command(alias = "ls")]
    List,

    /// Show one item in detail
    #[command(alias = "get")]
    Show {
        /// Item id
        id: String,
    },

    /// Add a new item
    #[command(alias = "new")]
    Add(NewItemArgs),

    /// Edit an existing item (unknown ids are added instead)
    #[command(alias = "edit")]
    Update {
        /// Item id
        id: String,

        #[command(flatten)]
        changes: ItemChanges,
    },

    /// Remove an item
    #[command(alias = "rm")]
    Delete {
        /// Item id
        id: String,
    },

    /// Reprint the item list every time it changes
    Watch {
        /// Seconds between reloads
        #[arg(long, short = 'i', default_value = "10")]
        interval: u64,
    },
}

#[derive(Debug, Args)]
pub struct NewItemArgs {
    /// Display name
    #[arg(long, short = 'n')]
    pub name: String,

    /// How many are on hand
    #[arg(long, short = 'Q', default_value = "1")]
    pub quantity: u32,

    /// Category (e.g. pantry, dairy, produce)
    #[arg(long, short = 'c', default_value = "other")]
    pub category: Category,

    /// Date received (YYYY-MM-DD) [default: today]
    #[arg(long)]
    pub received: Option<NaiveDate>,

    /// Expiration date (YYYY-MM-DD); marks the item as expiring
    #[arg(long)]
    pub expires: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct ItemChanges {
    /// New display name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New quantity
    #[arg(long, short = 'Q')]
    pub quantity: Option<u32>,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<Category>,

    /// New receive date (YYYY-MM-DD)
    #[arg(long)]
    pub received: Option<NaiveDate>,

    /// New expiration date (YYYY-MM-DD); marks the item as expiring
    #[arg(long, conflicts_with = "no_expiration")]
    pub expires: Option<NaiveDate>,

    /// Mark the item as non-expiring
    #[arg(long)]
    pub no_expiration: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
