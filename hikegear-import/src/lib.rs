//! Import gear from spreadsheets, remote lists and other backpacks.
//!
//! Every import here is a pure transformation: it takes the current document
//! and a batch of parsed input and returns the new document, assigning ids
//! that cannot collide with the ones already in use. Reading spreadsheets and
//! fetching remote pages is left to `hikegear-sheet` and `hikegear-scraper`.

pub mod copy;
pub mod error;
pub mod ids;
pub mod limits;
pub mod progress;
pub mod remote;
pub mod tabular;

pub use copy::copy_backpack;
pub use error::ImportError;
pub use ids::{IdPool, allocate_id};
pub use limits::{DEFAULT_IMPORT_CATEGORY, ImportLimits, clamp_weight, truncate_chars};
pub use progress::{ImportProgress, LogProgress, RowOutcome, SilentProgress};
pub use remote::{import_remote, weight_in_grams};
pub use tabular::{TabularStats, import_tabular, import_tabular_with_stats};
