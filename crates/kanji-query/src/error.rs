//! Error types for query parsing.
//!
//! The parser never stops at the first problem; it collects [`ParseError`]s
//! and keeps going. [`QueryError`] bundles those errors with the query text
//! for callers that prefer a `Result` and a printable diagnostic.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::lexer::Token;

/// A syntax error with the character offset it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} (at position {position})")]
pub struct ParseError {
    /// Human-readable description.
    pub message: String,
    /// Character offset in the query.
    pub position: usize,
    /// The token the parser was looking at, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
}

impl ParseError {
    /// Creates an error at a position without an associated token.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
            token: None,
        }
    }

    /// Creates an error pointing at a token.
    pub fn at_token(message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            position: token.position,
            token: Some(token.clone()),
        }
    }

    /// Returns a hint for common mistakes.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message.as_str();
        if message.contains("Unclosed quote") {
            Some("Add a closing quote (\") to complete the phrase")
        } else if message.contains("closing parenthesis") {
            Some("Add a closing parenthesis ) to match the opening one")
        } else if message.contains("AND operator") || message.contains("OR operator") {
            Some("AND and OR need expressions on both sides, e.g. 'en:fire | en:water'")
        } else if message.contains("NOT operator") {
            Some("NOT must be followed by a term, e.g. '!jlpt:N1'")
        } else if message.starts_with("Unknown prefix") {
            Some("Valid prefixes are: char, hv, en, vn, on, kun, com, jlpt, freq")
        } else if message.starts_with("Invalid JLPT level") || message.contains("JLPT level (") {
            Some("JLPT levels are written N1 (hardest) to N5 (easiest), e.g. 'jlpt:<N3'")
        } else if message.contains("number after comparison") {
            Some("Frequency comparisons take a number, e.g. 'freq:<500'")
        } else {
            None
        }
    }
}

/// A failed query: the query text and every syntax error found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The original query string.
    pub query: String,
    /// Errors in the order they were found.
    pub errors: Vec<ParseError>,
}

impl QueryError {
    /// Creates a query error.
    pub fn new(query: impl Into<String>, errors: Vec<ParseError>) -> Self {
        Self {
            query: query.into(),
            errors,
        }
    }

    /// Returns the first error message, or an empty string.
    pub fn message(&self) -> &str {
        self.errors.first().map_or("", |e| e.message.as_str())
    }

    /// Formats one error with the query and a caret under its position.
    ///
    /// The caret is padded by display width, so wide kana and kanji before
    /// the error take two columns each.
    pub fn format_with_context(&self, error: &ParseError) -> String {
        let prefix: String = self.query.chars().take(error.position).collect();
        let column = prefix.width();
        let mut out = format!("query syntax error: {}\n", error.message);
        out.push_str(&format!("  {}\n", self.query));
        out.push_str(&format!("  {}^", " ".repeat(column)));
        if let Some(hint) = error.suggestion() {
            out.push_str(&format!("\nhint: {hint}"));
        }
        out
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "query syntax error: empty query");
        }
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|e| self.format_with_context(e))
            .collect();
        f.write_str(&rendered.join("\n"))
    }
}

impl std::error::Error for QueryError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn parse_error_display() {
        let err = ParseError::new("Expected closing parenthesis", 4);
        assert_eq!(err.to_string(), "Expected closing parenthesis (at position 4)");
    }

    #[test]
    fn at_token_copies_position() {
        let token = Token::new(TokenKind::RParen, ")", 9);
        let err = ParseError::at_token("Unexpected token: )", &token);
        assert_eq!(err.position, 9);
        assert_eq!(err.token, Some(token));
    }

    #[test]
    fn query_error_shows_caret() {
        let err = QueryError::new(
            "(en:fire",
            vec![ParseError::new("Expected closing parenthesis", 8)],
        );
        let display = err.to_string();
        assert!(display.contains("query syntax error: Expected closing parenthesis"));
        assert!(display.contains("  (en:fire\n"));
        assert!(display.contains(&format!("  {}^", " ".repeat(8))));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn caret_follows_display_width() {
        let err = QueryError::new("火 &", vec![ParseError::new("x", 2)]);
        let display = err.to_string();
        assert!(display.ends_with(&format!("  {}^", " ".repeat(3))));

        let err = QueryError::new("kun:ひ &", vec![ParseError::new("x", 6)]);
        assert!(err.to_string().ends_with(&format!("  {}^", " ".repeat(7))));
    }

    #[test]
    fn caret_is_clamped_to_query() {
        let err = QueryError::new("ab", vec![ParseError::new("x", 40)]);
        assert!(err.to_string().ends_with(&format!("  {}^", " ".repeat(2))));
    }

    #[test]
    fn message_extraction() {
        let err = QueryError::new("q", vec![ParseError::new("first", 0), ParseError::new("second", 1)]);
        assert_eq!(err.message(), "first");
        assert_eq!(QueryError::new("", vec![]).message(), "");
    }

    #[test]
    fn unknown_prefix_suggestion() {
        let err = ParseError::new("Unknown prefix: title", 0);
        assert!(err.suggestion().unwrap().contains("Valid prefixes"));
    }

    #[test]
    fn jlpt_suggestion() {
        let err = ParseError::new("Invalid JLPT level: N7. Use N1-N5", 6);
        assert!(err.suggestion().unwrap().contains("N1 (hardest)"));
    }
}
