//! Completion candidates for the word being typed.

use crate::field::Field;

/// Boolean keywords offered as completions.
const KEYWORDS: [&str; 3] = ["AND", "OR", "NOT"];

/// Proposes completions for the word ending at `cursor` (a character offset).
///
/// Field prefixes (`en:`, `jlpt:`, ...) are offered while the word has no
/// colon yet, followed by the keywords `AND`, `OR` and `NOT`. Leading `(` and
/// `!` are ignored so `(en` and `!jl` still complete.
pub fn get_suggestions(query: &str, cursor: usize) -> Vec<String> {
    let before: String = query.chars().take(cursor).collect();
    let fragment = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(['(', '!']);

    let mut suggestions = Vec::new();

    if !fragment.contains(':') {
        let lower = fragment.to_lowercase();
        suggestions.extend(
            Field::prefixes()
                .filter(|prefix| prefix.starts_with(&lower))
                .map(|prefix| format!("{prefix}:")),
        );
    }

    let upper = fragment.to_uppercase();
    suggestions.extend(
        KEYWORDS
            .iter()
            .filter(|keyword| keyword.starts_with(&upper))
            .map(|keyword| (*keyword).to_string()),
    );

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_prefixes() {
        assert_eq!(get_suggestions("ku", 2), vec!["kun:", "kunyomi:"]);
        assert_eq!(get_suggestions("fire & JL", 9), vec!["jlpt:"]);
    }

    #[test]
    fn completes_keywords() {
        assert_eq!(get_suggestions("fire a", 6), vec!["AND"]);
        assert_eq!(get_suggestions("fire n", 6), vec!["NOT"]);
    }

    #[test]
    fn prefixes_come_before_keywords() {
        assert_eq!(get_suggestions("o", 1), vec!["on:", "onyomi:", "OR"]);
    }

    #[test]
    fn colon_suppresses_prefixes() {
        assert!(get_suggestions("en:f", 4).is_empty());
    }

    #[test]
    fn empty_fragment_offers_everything() {
        let all = get_suggestions("fire ", 5);
        assert_eq!(all.len(), Field::prefixes().count() + KEYWORDS.len());
        assert_eq!(all.first().map(String::as_str), Some("char:"));
        assert_eq!(all.last().map(String::as_str), Some("NOT"));
    }

    #[test]
    fn only_text_before_cursor_counts() {
        assert_eq!(get_suggestions("freq:<500", 2), vec!["freq:", "frequency:"]);
    }

    #[test]
    fn cursor_beyond_end_is_clamped() {
        assert_eq!(get_suggestions("hv", 99), vec!["hv:"]);
    }

    #[test]
    fn cursor_counts_characters() {
        assert_eq!(get_suggestions("火 c", 3), vec!["char:", "com:", "component:"]);
    }

    #[test]
    fn grouping_characters_are_ignored() {
        assert_eq!(get_suggestions("(vie", 4), vec!["vietnamese:"]);
        assert_eq!(get_suggestions("!jl", 3), vec!["jlpt:"]);
    }

    #[test]
    fn unmatched_fragment() {
        assert!(get_suggestions("xyz", 3).is_empty());
    }
}
