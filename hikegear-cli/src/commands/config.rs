use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::config::{Settings, config_path};
use crate::error::CliError;

/// Show effective settings and their sources.
pub(crate) fn run_config_show(settings: &Settings, path: Option<&Path>) -> Result<(), CliError> {
    log::info!(
        "{}",
        "hikegear Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let path = path.map(Path::to_path_buf).or_else(config_path);
    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let width = settings
        .sources
        .iter()
        .map(|(name, _, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, value, source) in &settings.sources {
        let source_str = format!("({})", source);
        log::info!(
            "  {:<width$}  {} {}",
            name,
            value,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
            width = width,
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path(path: Option<&Path>) -> Result<(), CliError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(config_path)
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}
