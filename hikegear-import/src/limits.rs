//! Field limits applied while importing.

use hikegear_catalog::{CATEGORY_ID_SPACE, ITEM_ID_SPACE};

/// Name of the category that collects rows appearing before any marker row.
pub const DEFAULT_IMPORT_CATEGORY: &str = "importowane z pliku excel";

/// Limits and labels for the tabular importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLimits {
    /// Maximum item name length, in characters.
    pub item_name_max: usize,
    /// Maximum item description length, in characters.
    pub item_description_max: usize,
    /// Maximum item weight in grams; larger weights saturate.
    pub item_max_weight: u32,
    /// Maximum number of rows in one import.
    pub max_rows: usize,
    pub category_id_bound: u32,
    pub item_id_bound: u32,
    /// Name of the synthetic category created by every tabular import.
    pub import_category_name: String,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            item_name_max: 60,
            item_description_max: 10_000,
            item_max_weight: 100_000,
            max_rows: 2000,
            category_id_bound: CATEGORY_ID_SPACE,
            item_id_bound: ITEM_ID_SPACE,
            import_category_name: DEFAULT_IMPORT_CATEGORY.to_string(),
        }
    }
}

/// Cut `s` to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Saturate an integer weight into `[0, max]`.
pub fn clamp_weight(weight: i64, max: u32) -> u32 {
    weight.clamp(0, i64::from(max)) as u32
}
