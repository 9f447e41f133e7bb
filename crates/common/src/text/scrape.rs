//! Scraper abstraction

use crate::errors::Result;
use async_trait::async_trait;

/// Leading text of every placeholder scrape
pub const SCRAPE_TEMPLATE_PREFIX: &str = "This is the full blog text scraped from: ";

/// Turns a blog URL into its full text
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Returns a fixed template embedding the URL; performs no network I/O
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderScraper;

#[async_trait]
impl Scraper for PlaceholderScraper {
    async fn scrape(&self, url: &str) -> Result<String> {
        Ok(format!("{SCRAPE_TEMPLATE_PREFIX}{url}"))
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}
