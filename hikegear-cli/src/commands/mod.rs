pub(crate) mod config;
pub(crate) mod copy_backpack;
pub(crate) mod import_remote;
pub(crate) mod import_sheet;
