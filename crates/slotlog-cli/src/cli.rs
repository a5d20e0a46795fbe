use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use tracing::level_filters::LevelFilter;

use slotlog_core::VERSION;

/// Slotlog - A 15-minute slot activity ledger for the terminal
#[derive(Parser)]
#[command(name = "slotlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the ledger documents
    #[arg(short, long, global = true, env = "SLOTLOG_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level written to stderr (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<LevelFilter>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols and table borders
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// First hour of the day grid (0-23)
    #[arg(long, requires = "end_hour")]
    pub start_hour: Option<u8>,

    /// Hour the day grid ends (0-24, overnight when not after the start)
    #[arg(long, requires = "start_hour")]
    pub end_hour: Option<u8>,
}

/// Arguments for the `day` command
#[derive(Args)]
pub struct DayArgs {
    /// Date to show (YYYY-MM-DD, today, yesterday)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `log` command
#[derive(Args)]
pub struct LogArgs {
    /// Slot start time (HH:MM on a quarter hour)
    #[arg(value_name = "TIME")]
    pub time: String,

    /// What you did
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Date of the slot (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Category (inferred from recent history when omitted)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `bulk` command
#[derive(Args)]
pub struct BulkArgs {
    /// Start time of the first line's slot (HH:MM)
    #[arg(value_name = "TIME")]
    pub time: String,

    /// Date of the first slot (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Category applied to every line
    #[arg(short, long)]
    pub category: Option<String>,

    /// Read lines from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New category
    #[arg(long, conflicts_with = "clear_category")]
    pub category: Option<String>,

    /// Remove the category
    #[arg(long)]
    pub clear_category: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `suggest` command
#[derive(Args)]
pub struct SuggestArgs {
    /// Only suggestions containing this text
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Maximum number of suggestions
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command group
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsSubcommand,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum StatsSubcommand {
    /// Time per category for one day
    Day {
        /// Date (defaults to today)
        #[arg(value_name = "DATE")]
        date: Option<String>,
    },

    /// Time per category for the Monday-start week containing a date
    Week {
        /// Any date in the week (defaults to today)
        #[arg(value_name = "DATE")]
        date: Option<String>,
    },

    /// Two days side by side
    Compare {
        #[arg(value_name = "FIRST")]
        first: String,

        #[arg(value_name = "SECOND")]
        second: String,
    },
}

/// Arguments for the `calendar` command
#[derive(Args)]
pub struct CalendarArgs {
    /// Only show this month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// File of `HH:MM description` lines (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Date the lines belong to (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `copy` command
#[derive(Args)]
pub struct CopyArgs {
    /// Date to copy (defaults to today)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write the backup to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

/// Arguments for the `restore` command
#[derive(Args)]
pub struct RestoreArgs {
    /// Backup file produced by `slotlog export`
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `note` command
#[derive(Args)]
pub struct NoteArgs {
    /// Date of the note (defaults to today)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Replace the note text
    #[arg(long, value_name = "TEXT", conflicts_with = "clear")]
    pub set: Option<String>,

    /// Remove the note
    #[arg(long)]
    pub clear: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `settings` command group
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show hours and categories
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the day grid bounds
    Hours {
        /// First hour (0-23)
        #[arg(value_name = "START")]
        start: u8,

        /// End hour (0-24); overnight when not after START
        #[arg(value_name = "END")]
        end: u8,
    },

    /// Add a category
    AddCategory {
        #[arg(value_name = "NAME")]
        name: String,

        /// Hex color (#rgb or #rrggbb)
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a category (entries keep their text)
    RemoveCategory {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Override a category's color
    Color {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(value_name = "HEX")]
        color: String,
    },
}

/// Arguments for the `reset` command
#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and config file
    Init(InitArgs),

    /// Show a day's slots and entries
    Day(DayArgs),

    /// Log what you did in one slot
    Log(LogArgs),

    /// Log consecutive slots, one line each, from stdin
    Bulk(BulkArgs),

    /// Edit an entry in place
    Edit(EditArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Suggest descriptions from recent history
    Suggest(SuggestArgs),

    /// Time spent per category
    Stats(StatsArgs),

    /// Days that have entries
    Calendar(CalendarArgs),

    /// Import `HH:MM description` lines
    Import(ImportArgs),

    /// Print a day as `HH:MM description` lines
    Copy(CopyArgs),

    /// Export a full backup as JSON
    Export(ExportArgs),

    /// Restore a backup (replaces all entries)
    Restore(RestoreArgs),

    /// Show or edit a daily note
    Note(NoteArgs),

    /// Show or change settings
    Settings(SettingsArgs),

    /// Delete all data and return to defaults
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
