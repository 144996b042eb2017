use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for court-calendar
/// CLI application that lays out court sessions on a monthly wall calendar
#[derive(Parser)]
#[command(
    name = "court-calendar",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a 12-sheet court session wall calendar workbook from a SQLite session database",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the session database
    Init,

    /// Build the calendar workbook for one year
    ///
    /// Ctrl-C aborts the run; files already written are kept and nothing
    /// else is cleaned up.
    Generate {
        /// Calendar year (YYYY)
        #[arg(long = "year")]
        year: i32,

        /// Identifier used in output file names (default: the year)
        #[arg(long = "run-id")]
        run_id: Option<String>,

        /// Output file (default: <output_folder>/court_session_calendar_<run-id>.xlsx)
        #[arg(long = "output")]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long = "force")]
        force: bool,
    },

    /// Print the week lane table computed for one year
    Lanes {
        /// Calendar year (YYYY)
        #[arg(long = "year")]
        year: i32,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },
}
