//! Text stubs behind the summariser
//!
//! None of these do real work: the scraper echoes a template, the summary
//! is a prefix slice and the translation is a word lookup.

mod scrape;
mod summary;
mod urdu;

pub use scrape::{PlaceholderScraper, Scraper, SCRAPE_TEMPLATE_PREFIX};
pub use summary::{summarise, NO_CONTENT, SUMMARY_CHARS};
pub use urdu::{translate_to_urdu, DICTIONARY};
