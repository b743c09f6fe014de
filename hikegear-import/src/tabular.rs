//! Merge spreadsheet rows into an existing gear list.
//!
//! Rows are processed in order. Item rows land in the "current" category,
//! which starts as a synthetic import category and is replaced by every
//! category marker row. New categories are appended after the existing ones,
//! and every new category and item gets the lowest id still free in the
//! whole list.

use hikegear_catalog::{CellValue, GearCategory, GearItem, GearList, RowKind, SheetRow};

use crate::error::ImportError;
use crate::ids::IdPool;
use crate::limits::{ImportLimits, clamp_weight, truncate_chars};
use crate::progress::{ImportProgress, RowOutcome};

/// Error field name used for tabular import failures.
const FIELD: &str = "excel";

/// Statistics from a single tabular import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TabularStats {
    pub total_rows: usize,
    pub categories_created: usize,
    pub items_created: usize,
    pub rows_skipped: usize,
    pub weights_clamped: usize,
    pub fields_truncated: usize,
}

/// Merge `rows` into a copy of `existing` using the default limits.
pub fn import_tabular(rows: &[SheetRow], existing: &GearList) -> Result<GearList, ImportError> {
    import_tabular_with_stats(rows, existing, &ImportLimits::default(), None).map(|(list, _)| list)
}

/// Merge `rows` into a copy of `existing`.
///
/// `existing` is never modified; on error the caller keeps its list as is.
pub fn import_tabular_with_stats(
    rows: &[SheetRow],
    existing: &GearList,
    limits: &ImportLimits,
    progress: Option<&dyn ImportProgress>,
) -> Result<(GearList, TabularStats), ImportError> {
    if rows.is_empty() {
        return Err(ImportError::validation(FIELD, "no items provided"));
    }
    if rows.len() > limits.max_rows {
        return Err(ImportError::validation(FIELD, "too many items"));
    }

    let mut stats = TabularStats {
        total_rows: rows.len(),
        ..Default::default()
    };

    if let Some(p) = progress {
        p.on_start(rows.len(), &limits.import_category_name);
    }

    let mut category_ids = IdPool::new(existing.category_ids(), limits.category_id_bound);
    let mut item_ids = IdPool::new(existing.item_ids(), limits.item_id_bound);

    let first_id = category_ids
        .next()
        .ok_or_else(|| ImportError::validation(FIELD, "can't find new id for category"))?;
    let mut new_categories = vec![GearCategory::new(
        first_id,
        limits.import_category_name.as_str(),
    )];
    stats.categories_created += 1;

    for (i, row) in rows.iter().enumerate() {
        match row.kind {
            RowKind::CategoryMarker => {
                let id = category_ids.next().ok_or_else(|| {
                    ImportError::validation(FIELD, "can't find new id for category")
                })?;
                let name = row.description.as_text().unwrap_or_default();
                log::debug!("Row {}: new category {} '{}'", i + 1, id, name);
                report(progress, i + 1, rows.len(), RowOutcome::Category { id, name });
                new_categories.push(GearCategory::new(id, name));
                stats.categories_created += 1;
            }
            RowKind::Item if row.name.is_blank() && row.description.is_blank() => {
                stats.rows_skipped += 1;
                report(progress, i + 1, rows.len(), RowOutcome::Skipped);
            }
            RowKind::Item => {
                let id = item_ids
                    .next()
                    .ok_or_else(|| ImportError::validation(FIELD, "can't find new id for item"))?;
                let (clamped_before, truncated_before) =
                    (stats.weights_clamped, stats.fields_truncated);
                let item = build_item(id, row, limits, &mut stats);
                log::debug!("Row {}: item {} '{}'", i + 1, id, item.name);
                report(progress, i + 1, rows.len(), RowOutcome::Item {
                    id,
                    name: &item.name,
                    weight_clamped: stats.weights_clamped > clamped_before,
                    truncated: stats.fields_truncated > truncated_before,
                });
                if let Some(current) = new_categories.last_mut() {
                    current.items.push(item);
                }
                stats.items_created += 1;
            }
        }
    }

    let mut merged = existing.clone();
    merged.categories.extend(new_categories);

    if let Some(p) = progress {
        p.on_finish(&stats);
    }

    Ok((merged, stats))
}

fn report(progress: Option<&dyn ImportProgress>, row: usize, total: usize, outcome: RowOutcome<'_>) {
    if let Some(p) = progress {
        p.on_row(row, total, outcome);
    }
}

fn build_item(id: u32, row: &SheetRow, limits: &ImportLimits, stats: &mut TabularStats) -> GearItem {
    let name = text_field(&row.name, limits.item_name_max, stats);
    let description = text_field(&row.description, limits.item_description_max, stats);

    // Only integer cells carry a weight; floats, text and booleans become 0.
    let weight = match row.weight {
        CellValue::Int(w) => {
            let clamped = clamp_weight(w, limits.item_max_weight);
            if i64::from(clamped) != w {
                stats.weights_clamped += 1;
            }
            clamped
        }
        _ => 0,
    };

    GearItem {
        id,
        name,
        description,
        weight,
    }
}

fn text_field(cell: &CellValue, max: usize, stats: &mut TabularStats) -> String {
    let Some(text) = cell.as_text() else {
        return String::new();
    };
    let cut = truncate_chars(text, max);
    if cut.len() != text.len() {
        stats.fields_truncated += 1;
    }
    cut.to_string()
}
