//! Word-for-word Urdu substitution

/// Lowercase English word to Urdu replacement
pub const DICTIONARY: &[(&str, &str)] = &[
    ("this", "یہ"),
    ("is", "ہے"),
    ("the", "یہ"),
    ("full", "مکمل"),
    ("blog", "بلاگ"),
    ("text", "متن"),
    ("fetched", "حاصل کیا گیا"),
    ("from", "سے"),
    ("summary", "خلاصہ"),
    ("scraped", "نکالا گیا"),
    ("content", "مواد"),
    ("url", "لنک"),
];

fn lookup(word: &str) -> Option<&'static str> {
    DICTIONARY
        .iter()
        .find(|(english, _)| *english == word)
        .map(|(_, urdu)| *urdu)
}

/// Lowercases `text`, splits it on single spaces and swaps every word found
/// in the dictionary. Punctuation stays attached, so `"summary:"` is left
/// alone.
pub fn translate_to_urdu(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| lookup(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(translate_to_urdu("This"), "یہ");
        assert_eq!(translate_to_urdu("BLOG Text"), "بلاگ متن");
    }

    #[test]
    fn test_unknown_words_pass_through() {
        assert_eq!(translate_to_urdu("hello world"), "hello world");
        let once = translate_to_urdu("Hello World");
        assert_eq!(translate_to_urdu(&once), once);
    }

    #[test]
    fn test_idempotent_on_translated_output() {
        let once = translate_to_urdu("This is the full blog text fetched from the URL");
        assert_eq!(once, "یہ ہے یہ مکمل بلاگ متن حاصل کیا گیا سے یہ لنک");
        assert_eq!(translate_to_urdu(&once), once);
    }

    #[test]
    fn test_punctuation_stays_attached() {
        assert_eq!(
            translate_to_urdu("Summary: This is the full blog text..."),
            "summary: یہ ہے یہ مکمل بلاگ text..."
        );
    }

    #[test]
    fn test_spacing_preserved() {
        assert_eq!(translate_to_urdu("this  is"), "یہ  ہے");
        assert_eq!(translate_to_urdu(""), "");
    }
}
