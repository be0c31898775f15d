//! Clap derive structures for the `skydeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use skydeck_core::ContentKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// skydeck -- content management CLI for the drone showcase
#[derive(Debug, Parser)]
#[command(
    name = "skydeck",
    version,
    about = "Manage drone-model content from the command line",
    long_about = "Administer the photo, video, and specification content behind\n\
        the drone showcase: list and mutate content records, manage the drone\n\
        catalog, and upload files to blob storage.",
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
    /// Store profile to use
    #[arg(long, short = 'p', env = "SKYDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Store base URL (overrides profile)
    #[arg(long, short = 's', env = "SKYDECK_STORE", global = true)]
    pub store: Option<String>,

    /// Session token
    #[arg(long, env = "SKYDECK_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SKYDECK_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SKYDECK_TIMEOUT", default_value = "30", global = true)]
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
    /// Plain text, one value per line (scripting)
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

/// Content kind as a CLI value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Photo,
    Video,
    Specification,
}

impl From<KindArg> for ContentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Photo => ContentKind::Photo,
            KindArg::Video => ContentKind::Video,
            KindArg::Specification => ContentKind::Specification,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage content items (photos, videos, specifications)
    #[command(alias = "c")]
    Content(ContentArgs),

    /// Manage the drone model catalog
    #[command(alias = "d")]
    Drones(DronesArgs),

    /// Sign in and store a session token in the keyring
    Login {
        /// Admin account email
        #[arg(long, env = "SKYDECK_EMAIL")]
        email: Option<String>,
    },

    /// Discard the stored session token
    Logout,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTENT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// List content for a drone, sorted by display order
    #[command(alias = "ls")]
    List {
        /// Drone model id (e.g. "krok")
        drone: String,

        /// Restrict to one content kind
        #[arg(long, short = 't', value_name = "KIND")]
        kind: Option<KindArg>,
    },

    /// Add a content item, optionally uploading a file first
    Add {
        /// Drone model id
        drone: String,

        /// Content kind
        #[arg(long, short = 't', value_name = "KIND")]
        kind: KindArg,

        /// Title (English, required)
        #[arg(long)]
        title: String,

        /// Title (Ukrainian, defaults to the English title)
        #[arg(long)]
        title_uk: Option<String>,

        /// Description (English)
        #[arg(long)]
        description: Option<String>,

        /// Description (Ukrainian)
        #[arg(long)]
        description_uk: Option<String>,

        /// File to upload as the item's asset
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Update a content item's descriptive fields and/or replace its file
    Update {
        /// Content item id
        id: String,

        /// Drone model id the item belongs to (used to locate it)
        #[arg(long)]
        drone: String,

        /// New title (English)
        #[arg(long)]
        title: Option<String>,

        /// New title (Ukrainian)
        #[arg(long)]
        title_uk: Option<String>,

        /// New description (English)
        #[arg(long)]
        description: Option<String>,

        /// New description (Ukrainian)
        #[arg(long)]
        description_uk: Option<String>,

        /// Replacement file to upload
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Delete a content item and its uploaded file
    #[command(alias = "rm")]
    Delete {
        /// Content item id
        id: String,

        /// Drone model id the item belongs to (used to locate it)
        #[arg(long)]
        drone: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DRONES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DronesArgs {
    #[command(subcommand)]
    pub command: DronesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DronesCommand {
    /// List the drone catalog
    #[command(alias = "ls")]
    List {
        /// Show the built-in fleet instead of querying the store
        #[arg(long)]
        builtin: bool,
    },

    /// Add a catalog entry
    Add {
        /// Display name (English)
        #[arg(long)]
        name: String,

        /// Display name (Ukrainian)
        #[arg(long)]
        name_uk: Option<String>,

        /// URL slug
        #[arg(long)]
        slug: String,

        /// Display order
        #[arg(long)]
        order: i64,
    },

    /// Update a catalog entry
    Update {
        /// Drone model id
        id: String,

        /// New display name (English)
        #[arg(long)]
        name: Option<String>,

        /// New display name (Ukrainian)
        #[arg(long)]
        name_uk: Option<String>,

        /// New URL slug
        #[arg(long)]
        slug: Option<String>,

        /// New display order
        #[arg(long)]
        order: Option<i64>,
    },

    /// Delete a catalog entry
    #[command(alias = "rm")]
    Delete {
        /// Drone model id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,

    /// Print the config file path
    Path,

    /// Show the resolved configuration
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
