pub mod client;
pub mod error;
pub mod page;

pub use client::{FetchOptions, PageClient};
pub use error::ScrapeError;
pub use page::{parse_page, scrape_backpack};
