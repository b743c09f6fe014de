//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hikegear")]
#[command(about = "Import gear lists from spreadsheets and shared list pages", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge an .xlsx spreadsheet into a private gear list
    ImportSheet {
        /// Spreadsheet to import (name, description, weight columns)
        xlsx: PathBuf,

        /// Gear list JSON document to merge into (created if missing)
        #[arg(short, long)]
        gear: PathBuf,

        /// Show what would be imported without writing the gear list
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Import a shared gear list page as a new backpack
    ImportRemote {
        /// URL of the shared list
        url: String,

        /// Where to write the backpack JSON
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Copy a stored backpack for another profile
    CopyBackpack {
        /// Stored backpack JSON record
        backpack: PathBuf,

        /// Profile id of the user asking for the copy
        #[arg(short, long)]
        requester: u64,

        /// Where to write the copied backpack JSON
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each one comes from
    Show,

    /// Print the config file path
    Path,
}
