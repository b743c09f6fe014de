use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hikegear_catalog::save_backpack;
use hikegear_import::import_remote;
use hikegear_scraper::{PageClient, scrape_backpack};

use crate::config::Settings;
use crate::error::CliError;

/// Fetch a shared list page and store it as a backpack draft.
pub(crate) fn run_import_remote(settings: &Settings, url: &str, out: &Path) -> Result<(), CliError> {
    let client = PageClient::new(settings.fetch.clone())?;
    log::info!("Fetching {}", url.if_supports_color(Stdout, |t| t.cyan()));

    let page = scrape_backpack(&client, url);
    let draft = import_remote(page)?;

    let items: usize = draft.list.iter().map(|c| c.items.len()).sum();
    log::info!(
        "{} '{}': {} categories, {} items, {:.0} g total",
        "Imported".if_supports_color(Stdout, |t| t.green()),
        draft.name,
        draft.list.len(),
        items,
        draft.total_weight()
    );

    save_backpack(out, &draft)?;
    log::info!("Wrote {}", out.display());
    Ok(())
}
