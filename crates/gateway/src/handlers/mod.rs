//! API handlers module

pub mod health;
pub mod page;
pub mod save;
pub mod scrape;
