//! Query lexer (tokenizer).
//!
//! Converts a query string into a flat token stream for the parser. The lexer
//! never fails: an unterminated quote becomes an [`TokenKind::Error`] token and
//! the parser decides how to report it.

use std::{fmt, iter::Peekable, str::Chars};

use serde::Serialize;
use tracing::trace;

use crate::field::Field;

/// Message carried by the error token for an unterminated quoted string.
pub const UNCLOSED_QUOTE: &str = "Unclosed quote";

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// A bare word.
    Text,
    /// A double-quoted string (quotes stripped, escapes resolved).
    QuotedString,
    /// A run of digits.
    Number,
    /// Two digit runs joined by a dash, e.g. `100-200`.
    Range,
    /// A recognised field prefix such as `en:`.
    Prefix(Field),
    /// A `name:` prefix that names no known field.
    UnknownPrefix,
    /// `&` or `AND`.
    And,
    /// `|` or `OR`.
    Or,
    /// `!` or `NOT`.
    Not,
    /// `(`.
    LParen,
    /// `)`.
    RParen,
    /// `<`.
    Lt,
    /// `>`.
    Gt,
    /// `<=`.
    Lte,
    /// `>=`.
    Gte,
    /// A lexical error; the value holds the message.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Whether this is one of the four comparison operators.
    pub fn is_comparison(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::Lte | Self::Gte)
    }

    /// Short upper-case label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::QuotedString => "QUOTED_STRING",
            Self::Number => "NUMBER",
            Self::Range => "RANGE",
            Self::Prefix(_) => "PREFIX",
            Self::UnknownPrefix => "UNKNOWN_PREFIX",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Lte => "LTE",
            Self::Gte => "GTE",
            Self::Error => "ERROR",
            Self::Eof => "EOF",
        }
    }
}

/// A token with its text and source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Token text. Prefixes are lower-cased and carry no colon.
    pub value: String,
    /// Character offset of the token's first character in the query.
    pub position: usize,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::QuotedString => write!(f, "\"{}\"", self.value),
            TokenKind::Prefix(_) | TokenKind::UnknownPrefix => write!(f, "{}:", self.value),
            TokenKind::Eof => f.write_str("end of query"),
            _ => f.write_str(&self.value),
        }
    }
}

/// Characters that end a bare word.
fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '|' | '&' | '!' | '<' | '>' | '"' | ':')
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current character offset in the input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Tokenizes the entire input. The last token is always `Eof`.
    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            let stop = token.kind == TokenKind::Error;
            tokens.push(token);
            if stop {
                break;
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.position));
        tokens
    }

    /// Returns the next token, or None at end of input.
    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let &ch = self.chars.peek()?;
            let start = self.position;

            let single = match ch {
                '"' => return Some(self.read_quoted()),
                '(' => Some(TokenKind::LParen),
                ')' => Some(TokenKind::RParen),
                '&' => Some(TokenKind::And),
                '|' => Some(TokenKind::Or),
                '!' => Some(TokenKind::Not),
                '<' | '>' => return Some(self.read_comparison(ch)),
                _ => None,
            };

            if let Some(kind) = single {
                self.advance();
                return Some(Token::new(kind, ch.to_string(), start));
            }

            if let Some(token) = self.read_word() {
                return Some(token);
            }
        }
    }

    /// Reads a double-quoted string.
    fn read_quoted(&mut self) -> Token {
        let start = self.position;
        self.advance(); // opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance();
                    return Token::new(TokenKind::QuotedString, content, start);
                }
                Some(&'\\') => {
                    self.advance();
                    if self.chars.peek() == Some(&'"') {
                        content.push('"');
                        self.advance();
                    } else {
                        content.push('\\');
                    }
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Token::new(TokenKind::Error, UNCLOSED_QUOTE, start),
            }
        }
    }

    /// Reads `<`, `>`, `<=` or `>=`.
    fn read_comparison(&mut self, first: char) -> Token {
        let start = self.position;
        self.advance();

        if self.chars.peek() == Some(&'=') {
            self.advance();
            let kind = if first == '<' {
                TokenKind::Lte
            } else {
                TokenKind::Gte
            };
            return Token::new(kind, format!("{first}="), start);
        }

        let kind = if first == '<' {
            TokenKind::Lt
        } else {
            TokenKind::Gt
        };
        Token::new(kind, first.to_string(), start)
    }

    /// Reads a word, keyword, number, range or field prefix.
    ///
    /// Returns None when positioned on a bare colon, which is skipped.
    fn read_word(&mut self) -> Option<Token> {
        let start = self.position;
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if is_word_boundary(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        if self.chars.peek() == Some(&':') {
            self.advance();
            if word.is_empty() {
                return None;
            }
            let name = word.to_lowercase();
            let kind = Field::from_prefix(&name).map_or(TokenKind::UnknownPrefix, TokenKind::Prefix);
            return Some(Token::new(kind, name, start));
        }

        let kind = match word.to_uppercase().as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            _ if is_range(&word) => TokenKind::Range,
            _ if is_number(&word) => TokenKind::Number,
            _ => TokenKind::Text,
        };

        Some(Token::new(kind, word, start))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.position += 1;
        }
    }
}

/// Matches `^\d+$`.
fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

/// Matches `^\d+-\d+$`.
fn is_range(word: &str) -> bool {
    word.split_once('-')
        .is_some_and(|(min, max)| is_number(min) && is_number(max))
}

/// Tokenizes a query string. The returned stream always ends with `Eof`.
pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens = Lexer::new(input).tokenize();
    trace!(count = tokens.len(), "tokenized query");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Token kinds without the trailing Eof.
    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut kinds: Vec<_> = tokenize(input).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds.pop(), Some(TokenKind::Eof));
        kinds
    }

    fn values(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![]);
        assert_eq!(kinds("   "), vec![]);
    }

    #[test]
    fn eof_position_is_input_length() {
        let tokens = tokenize("火 ");
        assert_eq!(tokens.last().unwrap().position, 2);
    }

    #[test]
    fn single_term() {
        assert_eq!(kinds("fire"), vec![TokenKind::Text]);
        assert_eq!(values("fire"), vec!["fire", ""]);
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds("(a & b) | !c"),
            vec![
                TokenKind::LParen,
                TokenKind::Text,
                TokenKind::And,
                TokenKind::Text,
                TokenKind::RParen,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Text,
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("a and b Or not c"),
            vec![
                TokenKind::Text,
                TokenKind::And,
                TokenKind::Text,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Text,
            ]
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            kinds("< > <= >="),
            vec![TokenKind::Lt, TokenKind::Gt, TokenKind::Lte, TokenKind::Gte]
        );
        assert_eq!(values("<=5"), vec!["<=", "5", ""]);
    }

    #[test]
    fn numbers_and_ranges() {
        assert_eq!(
            kinds("100 100-200 1-2-3 12a"),
            vec![
                TokenKind::Number,
                TokenKind::Range,
                TokenKind::Text,
                TokenKind::Text
            ]
        );
    }

    #[test]
    fn known_prefixes() {
        let tokens = tokenize("EN:fire hv:hoa");
        assert_eq!(tokens[0].kind, TokenKind::Prefix(Field::Meaning));
        assert_eq!(tokens[0].value, "en");
        assert_eq!(tokens[1].kind, TokenKind::Text);
        assert_eq!(tokens[2].kind, TokenKind::Prefix(Field::HanViet));
        assert_eq!(tokens[3].value, "hoa");
    }

    #[test]
    fn unknown_prefix() {
        let tokens = tokenize("Title:guide");
        assert_eq!(tokens[0].kind, TokenKind::UnknownPrefix);
        assert_eq!(tokens[0].value, "title");
    }

    #[test]
    fn bare_colon_is_skipped() {
        assert_eq!(kinds(": fire"), vec![TokenKind::Text]);
    }

    #[test]
    fn prefix_with_comparison() {
        assert_eq!(
            kinds("jlpt:<N3 freq:>=500"),
            vec![
                TokenKind::Prefix(Field::JlptLevel),
                TokenKind::Lt,
                TokenKind::Text,
                TokenKind::Prefix(Field::Frequency),
                TokenKind::Gte,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn quoted_string() {
        let tokens = tokenize("en:\"to burn\"");
        assert_eq!(tokens[1].kind, TokenKind::QuotedString);
        assert_eq!(tokens[1].value, "to burn");
        assert_eq!(tokens[1].position, 3);
    }

    #[test]
    fn escaped_quote_inside_string() {
        let tokens = tokenize(r#""say \"hi\" \n""#);
        assert_eq!(tokens[0].kind, TokenKind::QuotedString);
        assert_eq!(tokens[0].value, r#"say "hi" \n"#);
    }

    #[test]
    fn unclosed_quote_stops_tokenizing() {
        let tokens = tokenize("fire & \"water");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::And,
                TokenKind::Error,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[2].value, UNCLOSED_QUOTE);
        assert_eq!(tokens[2].position, 7);
    }

    #[test]
    fn positions_count_characters() {
        let tokens = tokenize("on:コウ & kun:い");
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 6, 8, 12, 13]);
    }

    #[test]
    fn operators_end_words() {
        assert_eq!(
            kinds("a&b|c"),
            vec![
                TokenKind::Text,
                TokenKind::And,
                TokenKind::Text,
                TokenKind::Or,
                TokenKind::Text
            ]
        );
    }

    #[test]
    fn token_display() {
        let tokens = tokenize("en:\"fire\" )");
        assert_eq!(tokens[0].to_string(), "en:");
        assert_eq!(tokens[1].to_string(), "\"fire\"");
        assert_eq!(tokens[2].to_string(), ")");
        assert_eq!(tokens[3].to_string(), "end of query");
    }
}
