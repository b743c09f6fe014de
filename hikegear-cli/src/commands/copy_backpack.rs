use std::path::Path;

use hikegear_catalog::{ProfileId, load_backpack, save_backpack};
use hikegear_import::copy_backpack;

use crate::error::CliError;

pub(crate) fn run_copy_backpack(backpack: &Path, requester: u64, out: &Path) -> Result<(), CliError> {
    let source = load_backpack(backpack)?;
    let draft = copy_backpack(&source, ProfileId(requester))?;
    save_backpack(out, &draft)?;
    log::info!(
        "Copied backpack {} '{}' to {}",
        source.id,
        draft.name,
        out.display()
    );
    Ok(())
}
