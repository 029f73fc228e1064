//! Kanji records and typed access to their queryable fields.

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A typed view of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A single string value.
    Text(&'a str),
    /// An ordered list of strings.
    List(&'a [String]),
    /// A numeric value, absent when the record has none.
    Number(Option<u64>),
}

impl FieldValue<'_> {
    /// Returns the value as a number, if it has a numeric reading.
    ///
    /// Text is parsed as an unsigned integer after trimming. Lists never
    /// have a numeric reading.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::List(_) => None,
        }
    }
}

/// Anything a query can be evaluated against.
pub trait Record {
    /// Returns the value stored for `field`.
    fn field_value(&self, field: Field) -> FieldValue<'_>;
}

/// A kanji entry as stored in the study data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kanji {
    /// The character.
    pub kanji: String,
    /// Sino-Vietnamese reading(s), comma or space separated.
    #[serde(default)]
    pub han_viet: String,
    /// English gloss.
    #[serde(default)]
    pub meaning: String,
    /// Vietnamese gloss.
    #[serde(default)]
    pub vietnamese_meaning: String,
    /// On'yomi readings.
    #[serde(default)]
    pub onyomi: Vec<String>,
    /// Kun'yomi readings.
    #[serde(default)]
    pub kunyomi: Vec<String>,
    /// Component identifiers.
    #[serde(default)]
    pub components: String,
    /// JLPT level, `N1` (hardest) to `N5` (easiest).
    #[serde(default)]
    pub jlpt_level: String,
    /// Frequency rank; lower is more common.
    #[serde(default)]
    pub frequency: Option<u64>,
    /// Free-form tags. Not reachable from queries.
    #[serde(default)]
    pub category: Vec<String>,
}

impl Kanji {
    /// Creates a record with only the character set.
    pub fn new(kanji: impl Into<String>) -> Self {
        Self {
            kanji: kanji.into(),
            ..Self::default()
        }
    }
}

impl Record for Kanji {
    fn field_value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Kanji => FieldValue::Text(&self.kanji),
            Field::HanViet => FieldValue::Text(&self.han_viet),
            Field::Meaning => FieldValue::Text(&self.meaning),
            Field::VietnameseMeaning => FieldValue::Text(&self.vietnamese_meaning),
            Field::Onyomi => FieldValue::List(&self.onyomi),
            Field::Kunyomi => FieldValue::List(&self.kunyomi),
            Field::Components => FieldValue::Text(&self.components),
            Field::JlptLevel => FieldValue::Text(&self.jlpt_level),
            Field::Frequency => FieldValue::Number(self.frequency),
        }
    }
}
