//! Clap derive structures for the `studyrooms` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap and clap_complete may be used here: `build.rs` includes this
//! file to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// studyrooms -- book study spaces from the command line
#[derive(Debug, Parser)]
#[command(
    name = "studyrooms",
    version,
    about = "Reserve study rooms and manage spaces from the command line",
    long_about = "Client for the Study Rooms reservation service.\n\n\
        Students list spaces and book or cancel reservations; staff accounts\n\
        also manage spaces, see every reservation and query occupancy.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "STUDYROOMS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 's', env = "STUDYROOMS_SERVER", global = true)]
    pub server: Option<String>,

    /// File holding the session token (default: per-profile data file)
    #[arg(long, env = "STUDYROOMS_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STUDYROOMS_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STUDYROOMS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STUDYROOMS_TIMEOUT", default_value = "30", global = true)]
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store a session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Show session state, role and a summary of your data
    #[command(alias = "whoami")]
    Status,

    /// Create a student account
    Register(RegisterArgs),

    /// List and manage study spaces
    #[command(alias = "sp")]
    Spaces(SpacesArgs),

    /// Book, list and cancel your reservations
    #[command(alias = "res", alias = "r")]
    Reservations(ReservationsArgs),

    /// Staff view of all reservations
    Staff(StaffArgs),

    /// Occupancy statistics (staff)
    Stats(StatsArgs),

    /// Current weather or forecast at the campus
    Weather(WeatherArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account name (default: the profile's username, else prompt)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account name
    #[arg(long, short = 'u')]
    pub username: String,

    /// Full name shown to staff
    #[arg(long)]
    pub full_name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,
}

// ── Spaces ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SpacesArgs {
    #[command(subcommand)]
    pub command: SpacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpacesCommand {
    /// List study spaces
    #[command(alias = "ls")]
    List,

    /// Show one space
    Show {
        /// Space id or name
        space: String,
    },

    /// Create a space (staff)
    Create(SpaceFields),

    /// Update a space (staff); unset fields keep their value
    Update {
        /// Space id or name
        space: String,

        #[command(flatten)]
        fields: SpaceUpdate,
    },

    /// Delete a space (staff)
    #[command(alias = "rm")]
    Delete {
        /// Space id or name
        space: String,
    },
}

#[derive(Debug, Args)]
pub struct SpaceFields {
    /// Display name
    #[arg(long, required_unless_present = "from_file")]
    pub name: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Number of seats
    #[arg(long, required_unless_present = "from_file")]
    pub capacity: Option<u32>,

    /// Opening time (HH:MM)
    #[arg(long)]
    pub open: Option<String>,

    /// Closing time (HH:MM)
    #[arg(long)]
    pub close: Option<String>,

    /// Open around the clock
    #[arg(long, conflicts_with_all = ["open", "close"])]
    pub full_day: bool,

    /// Read the space as JSON from a file instead
    #[arg(long, conflicts_with_all = ["name", "capacity"])]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SpaceUpdate {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub capacity: Option<u32>,

    /// Opening time (HH:MM)
    #[arg(long)]
    pub open: Option<String>,

    /// Closing time (HH:MM)
    #[arg(long)]
    pub close: Option<String>,

    /// Open around the clock (true/false)
    #[arg(long)]
    pub full_day: Option<bool>,
}

// ── Reservations ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List your reservations
    #[command(alias = "ls")]
    List {
        /// Every reservation visible to you, not only your own
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Book a space
    #[command(alias = "book")]
    Create {
        /// Space id or name
        #[arg(long)]
        space: String,

        /// Day of the booking (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM); defaults to two hours after start
        #[arg(long)]
        end: Option<String>,
    },

    /// Cancel one of your reservations
    Cancel {
        /// Reservation id
        id: i64,
    },
}

// ── Staff ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List all reservations
    #[command(alias = "ls")]
    List {
        /// Only this day (YYYY-MM-DD, or "today")
        #[arg(long)]
        date: Option<String>,
    },

    /// Cancel any reservation
    Cancel {
        /// Reservation id
        id: i64,

        /// Day filter for the refreshed listing
        #[arg(long)]
        date: Option<String>,
    },
}

// ── Stats ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Daily occupancy of a space over a date range
    Occupancy {
        /// Space id or name
        #[arg(long)]
        space: Option<String>,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

// ── Weather ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WeatherArgs {
    /// Latitude (default: campus)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (default: campus)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Forecast time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub at: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

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

    /// Set a configuration value on the active profile
    Set {
        /// Config key (server, username, password_env, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name (default: active profile)
        name: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
