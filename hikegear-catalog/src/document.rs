//! JSON document I/O for gear lists and backpacks.
//!
//! Documents are always replaced whole: writes go to a sibling temporary file
//! which is then renamed over the target.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Backpack, BackpackDraft, CATEGORY_ID_SPACE, GearList, ITEM_ID_SPACE};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Invalid gear list: {0}")]
    Invalid(String),
}

impl DocumentError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Check the id invariants of a gear list.
///
/// Category ids must be unique and below [`CATEGORY_ID_SPACE`]; item ids must
/// be unique across the whole list and below [`ITEM_ID_SPACE`].
pub fn validate_gear_list(list: &GearList) -> Result<(), DocumentError> {
    let mut category_ids = HashSet::new();
    let mut item_ids = HashSet::new();

    for category in &list.categories {
        if category.id >= CATEGORY_ID_SPACE {
            return Err(DocumentError::invalid(format!(
                "category id {} out of range (max {})",
                category.id,
                CATEGORY_ID_SPACE - 1
            )));
        }
        if !category_ids.insert(category.id) {
            return Err(DocumentError::invalid(format!(
                "duplicate category id {}",
                category.id
            )));
        }
        for item in &category.items {
            if item.id >= ITEM_ID_SPACE {
                return Err(DocumentError::invalid(format!(
                    "item id {} out of range (max {})",
                    item.id,
                    ITEM_ID_SPACE - 1
                )));
            }
            if !item_ids.insert(item.id) {
                return Err(DocumentError::invalid(format!(
                    "duplicate item id {} in category '{}'",
                    item.id, category.name
                )));
            }
        }
    }

    Ok(())
}

/// Load a gear list document. A missing file is an empty list.
pub fn load_gear_list(path: &Path) -> Result<GearList, DocumentError> {
    if !path.exists() {
        log::debug!("No gear list at {}, starting empty", path.display());
        return Ok(GearList::default());
    }
    let list: GearList = read_json(path)?;
    validate_gear_list(&list)?;
    Ok(list)
}

/// Replace the gear list document at `path`.
pub fn save_gear_list(path: &Path, list: &GearList) -> Result<(), DocumentError> {
    validate_gear_list(list)?;
    write_json(path, list)
}

/// Load a stored backpack record.
pub fn load_backpack(path: &Path) -> Result<Backpack, DocumentError> {
    read_json(path)
}

/// Write a backpack draft document.
pub fn save_backpack(path: &Path, draft: &BackpackDraft) -> Result<(), DocumentError> {
    write_json(path, draft)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let contents = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| DocumentError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DocumentError> {
    let contents = serde_json::to_string_pretty(value)?;
    let io_err = |e| DocumentError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;
    Ok(())
}
