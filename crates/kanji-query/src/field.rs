//! Queryable record fields and the prefix table that names them.

use std::fmt;

use serde::Serialize;

/// A record attribute that can be targeted with a `prefix:` in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// The character itself.
    Kanji,
    /// Sino-Vietnamese reading.
    HanViet,
    /// English gloss.
    Meaning,
    /// Vietnamese gloss.
    VietnameseMeaning,
    /// On'yomi readings.
    Onyomi,
    /// Kun'yomi readings.
    Kunyomi,
    /// Component identifiers.
    Components,
    /// JLPT level (`N1`..`N5`).
    JlptLevel,
    /// Frequency rank.
    Frequency,
}

/// Prefix spellings in the order they are offered as completions.
const PREFIX_TABLE: &[(&str, Field)] = &[
    ("char", Field::Kanji),
    ("kanji", Field::Kanji),
    ("hanviet", Field::HanViet),
    ("hv", Field::HanViet),
    ("en", Field::Meaning),
    ("english", Field::Meaning),
    ("vn", Field::VietnameseMeaning),
    ("vietnamese", Field::VietnameseMeaning),
    ("on", Field::Onyomi),
    ("onyomi", Field::Onyomi),
    ("kun", Field::Kunyomi),
    ("kunyomi", Field::Kunyomi),
    ("com", Field::Components),
    ("component", Field::Components),
    ("jlpt", Field::JlptLevel),
    ("freq", Field::Frequency),
    ("frequency", Field::Frequency),
];

impl Field {
    /// Every queryable field.
    pub const ALL: [Self; 9] = [
        Self::Kanji,
        Self::HanViet,
        Self::Meaning,
        Self::VietnameseMeaning,
        Self::Onyomi,
        Self::Kunyomi,
        Self::Components,
        Self::JlptLevel,
        Self::Frequency,
    ];

    /// Fields consulted by a search without a prefix.
    pub const DEFAULT_SEARCH: [Self; 4] = [
        Self::Kanji,
        Self::HanViet,
        Self::Meaning,
        Self::VietnameseMeaning,
    ];

    /// Looks up a prefix name, ignoring case.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let lower = prefix.to_lowercase();
        PREFIX_TABLE
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, field)| *field)
    }

    /// All prefix spellings, in table order.
    pub fn prefixes() -> impl Iterator<Item = &'static str> {
        PREFIX_TABLE.iter().map(|(name, _)| *name)
    }

    /// Prefix spellings that select this field.
    pub fn prefixes_for(self) -> impl Iterator<Item = &'static str> {
        PREFIX_TABLE
            .iter()
            .filter(move |(_, field)| *field == self)
            .map(|(name, _)| *name)
    }

    /// The record attribute name, as it appears in JSON data.
    pub fn name(self) -> &'static str {
        match self {
            Self::Kanji => "kanji",
            Self::HanViet => "hanViet",
            Self::Meaning => "meaning",
            Self::VietnameseMeaning => "vietnameseMeaning",
            Self::Onyomi => "onyomi",
            Self::Kunyomi => "kunyomi",
            Self::Components => "components",
            Self::JlptLevel => "jlptLevel",
            Self::Frequency => "frequency",
        }
    }

    /// The shortest prefix that selects this field.
    pub fn short_prefix(self) -> &'static str {
        self.prefixes_for()
            .min_by_key(|name| name.len())
            .unwrap_or("kanji")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a JLPT level string such as `N3` or `n5` into its rank.
///
/// Rank 1 is the hardest level and 5 the easiest. Returns `None` unless the
/// string contains `N` followed by a digit between 1 and 5.
pub fn jlpt_rank(level: &str) -> Option<u8> {
    let upper = level.to_uppercase();
    let mut chars = upper.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != 'N' {
            continue;
        }
        if let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
            return match digit {
                1..=5 => u8::try_from(digit).ok(),
                _ => None,
            };
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lookup_is_case_insensitive() {
        assert_eq!(Field::from_prefix("EN"), Some(Field::Meaning));
        assert_eq!(Field::from_prefix("Hv"), Some(Field::HanViet));
        assert_eq!(Field::from_prefix("kunyomi"), Some(Field::Kunyomi));
        assert_eq!(Field::from_prefix("title"), None);
    }

    #[test]
    fn every_field_has_a_prefix() {
        for field in Field::ALL {
            assert!(field.prefixes_for().next().is_some(), "{field} has no prefix");
        }
    }

    #[test]
    fn short_prefix_picks_shortest_form() {
        assert_eq!(Field::Kanji.short_prefix(), "char");
        assert_eq!(Field::Frequency.short_prefix(), "freq");
        assert_eq!(Field::VietnameseMeaning.short_prefix(), "vn");
    }

    #[test]
    fn jlpt_rank_accepts_any_case() {
        assert_eq!(jlpt_rank("N5"), Some(5));
        assert_eq!(jlpt_rank("n1"), Some(1));
        assert_eq!(jlpt_rank("JLPT n3"), Some(3));
    }

    #[test]
    fn jlpt_rank_rejects_out_of_range() {
        assert_eq!(jlpt_rank("N6"), None);
        assert_eq!(jlpt_rank("N0"), None);
        assert_eq!(jlpt_rank("5"), None);
        assert_eq!(jlpt_rank(""), None);
    }
}
