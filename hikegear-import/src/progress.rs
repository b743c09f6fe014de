//! Row-by-row reporting for spreadsheet imports.

use crate::tabular::TabularStats;

/// What a single spreadsheet row turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome<'a> {
    /// A new item in the current category.
    Item {
        id: u32,
        name: &'a str,
        /// The weight fell outside `[0, max]` and was clamped.
        weight_clamped: bool,
        /// The name or description was cut to its maximum length.
        truncated: bool,
    },
    /// A marker row that opened a new category.
    Category { id: u32, name: &'a str },
    /// An item row with neither name nor description.
    Skipped,
}

/// Receives progress while rows are merged into a gear list.
pub trait ImportProgress {
    /// Called once before the first row.
    fn on_start(&self, total_rows: usize, import_category: &str);

    /// Called after each row; `row` is 1-based.
    fn on_row(&self, row: usize, total_rows: usize, outcome: RowOutcome<'_>);

    /// Called once after the last row with the final counts.
    fn on_finish(&self, stats: &TabularStats);
}

/// Discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_start(&self, _total_rows: usize, _import_category: &str) {}
    fn on_row(&self, _row: usize, _total_rows: usize, _outcome: RowOutcome<'_>) {}
    fn on_finish(&self, _stats: &TabularStats) {}
}

/// Reports through the `log` crate: new categories at info, per-item
/// adjustments at debug, and a row counter every 500 rows.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_start(&self, total_rows: usize, import_category: &str) {
        log::info!(
            "Importing {} spreadsheet row(s); rows before the first category go to '{}'",
            total_rows,
            import_category
        );
    }

    fn on_row(&self, row: usize, total_rows: usize, outcome: RowOutcome<'_>) {
        match outcome {
            RowOutcome::Category { id, name } => {
                log::info!("  row {}: category '{}' (id {})", row, name, id);
            }
            RowOutcome::Item {
                name,
                weight_clamped,
                truncated,
                ..
            } => {
                if weight_clamped {
                    log::debug!("  row {}: weight of '{}' clamped", row, name);
                }
                if truncated {
                    log::debug!("  row {}: text of '{}' truncated", row, name);
                }
            }
            RowOutcome::Skipped => log::debug!("  row {}: blank, skipped", row),
        }
        if row % 500 == 0 && row != total_rows {
            log::info!("  [{}/{}] rows read", row, total_rows);
        }
    }

    fn on_finish(&self, stats: &TabularStats) {
        log::info!(
            "Imported {} item(s) into {} new categor{} from {} row(s)",
            stats.items_created,
            stats.categories_created,
            if stats.categories_created == 1 { "y" } else { "ies" },
            stats.total_rows,
        );
    }
}
