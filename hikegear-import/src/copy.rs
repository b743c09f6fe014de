//! Copy a stored backpack into a new draft owned by the requester.

use hikegear_catalog::{Backpack, BackpackDraft, ProfileId};

use crate::error::ImportError;

/// Copy `source` as a new backpack for `requester`.
///
/// Anyone may copy a shared backpack; a private one only by its owner. The
/// list is copied as is, ids included.
pub fn copy_backpack(source: &Backpack, requester: ProfileId) -> Result<BackpackDraft, ImportError> {
    if source.owner != requester && !source.shared {
        return Err(ImportError::forbidden(format!(
            "backpack {} is not shared",
            source.id
        )));
    }

    log::debug!(
        "Copying backpack {} of profile {} for profile {}",
        source.id,
        source.owner,
        requester
    );

    Ok(BackpackDraft {
        name: source.name.clone(),
        description: source.description.clone(),
        list: source.list.clone(),
    })
}
