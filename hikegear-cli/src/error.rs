use thiserror::Error;

use hikegear_catalog::DocumentError;
use hikegear_import::ImportError;
use hikegear_scraper::ScrapeError;
use hikegear_sheet::SheetError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Reading or writing a JSON document failed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The spreadsheet could not be read
    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Fetching a remote list failed
    #[error("Fetch error: {0}")]
    Scrape(#[from] ScrapeError),

    /// The import itself was rejected
    #[error("Import failed ({code}): {0}", code = .0.status_code())]
    Import(#[from] ImportError),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
