//! Prefix "summary"

/// Characters of text kept in a summary
pub const SUMMARY_CHARS: usize = 60;

/// Stand-in text when a scrape came back empty
pub const NO_CONTENT: &str = "No content found";

/// `Summary: <first 60 characters>...`
///
/// Counts characters, not bytes, so a multi-byte character is never split.
pub fn summarise(text: &str) -> String {
    let head: String = text.chars().take(SUMMARY_CHARS).collect();
    format!("Summary: {head}...")
}
