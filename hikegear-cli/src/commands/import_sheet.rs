use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hikegear_catalog::{load_gear_list, save_gear_list};
use hikegear_import::{ImportProgress, LogProgress, SilentProgress, import_tabular_with_stats};
use hikegear_sheet::read_rows_from_path;

use crate::config::Settings;
use crate::error::CliError;

/// Merge a spreadsheet into a gear list document.
pub(crate) fn run_import_sheet(
    settings: &Settings,
    xlsx: &Path,
    gear: &Path,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let rows = read_rows_from_path(xlsx, &settings.sheet)?;
    let existing = load_gear_list(gear)?;
    log::info!(
        "Importing {} into {} ({} existing categor{})",
        xlsx.display().if_supports_color(Stdout, |t| t.cyan()),
        gear.display().if_supports_color(Stdout, |t| t.cyan()),
        existing.len(),
        if existing.len() == 1 { "y" } else { "ies" },
    );

    let progress: &dyn ImportProgress = if quiet { &SilentProgress } else { &LogProgress };
    let (list, stats) = import_tabular_with_stats(&rows, &existing, &settings.limits, Some(progress))?;

    if stats.rows_skipped > 0 {
        log::warn!("Skipped {} row(s) without a name or description", stats.rows_skipped);
    }
    if stats.weights_clamped > 0 {
        log::warn!(
            "{} weight(s) outside 0..={} g were clamped",
            stats.weights_clamped,
            settings.limits.item_max_weight
        );
    }
    if stats.fields_truncated > 0 {
        log::warn!("{} text field(s) were truncated", stats.fields_truncated);
    }

    for category in &list.categories[existing.len()..] {
        log::info!(
            "  {} {} ({} item(s))",
            "+".if_supports_color(Stdout, |t| t.green()),
            category.name.if_supports_color(Stdout, |t| t.bold()),
            category.items.len()
        );
    }

    if dry_run {
        log::info!(
            "{}",
            "Dry run: gear list not written".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    save_gear_list(gear, &list)?;
    log::info!(
        "Wrote {} categories, {} items to {}",
        list.len(),
        list.item_count(),
        gear.display()
    );
    Ok(())
}
