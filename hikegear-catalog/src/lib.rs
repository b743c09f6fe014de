//! Gear list data model and JSON document I/O.
//!
//! This crate defines the persisted shapes of a profile's private gear and of
//! backpack records, plus the intermediate row/page models the importers
//! consume. It has no knowledge of how those models are produced.

pub mod document;
pub mod types;

pub use document::{
    DocumentError, load_backpack, load_gear_list, save_backpack, save_gear_list,
    validate_gear_list,
};
pub use types::*;
