//! Read gear rows from `.xlsx` workbooks.
//!
//! Only the active worksheet and its first three columns (name, description,
//! weight) are read. Rows are classified here, so the importer only ever sees
//! an explicit [`RowKind`](hikegear_catalog::RowKind).

pub mod error;
pub mod xlsx;

pub use error::SheetError;
pub use xlsx::{DEFAULT_CATEGORY_KEYWORD, SheetOptions, classify_row, read_rows, read_rows_from_path};
