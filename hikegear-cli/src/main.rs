//! hikegear CLI
//!
//! Command-line interface for importing gear lists from spreadsheets and
//! shared list pages.

mod cli_types;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use config::Settings;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    // `config path` works even when the file is broken.
    if let Commands::Config {
        action: ConfigAction::Path,
    } = &cli.command
    {
        return commands::config::run_config_path(config_path);
    }

    let settings = Settings::load(config_path)?;

    match cli.command {
        Commands::ImportSheet { xlsx, gear, dry_run } => {
            commands::import_sheet::run_import_sheet(&settings, &xlsx, &gear, dry_run, cli.quiet)
        }
        Commands::ImportRemote { url, out } => {
            commands::import_remote::run_import_remote(&settings, &url, &out)
        }
        Commands::CopyBackpack {
            backpack,
            requester,
            out,
        } => commands::copy_backpack::run_copy_backpack(&backpack, requester, &out),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, config_path),
            ConfigAction::Path => commands::config::run_config_path(config_path),
        },
    }
}
