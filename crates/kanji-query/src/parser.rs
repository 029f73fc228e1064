//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! expression    → or_expr
//! or_expr       → and_expr (OR and_expr)*
//! and_expr      → not_expr (AND? not_expr)*
//! not_expr      → NOT primary | primary
//! primary       → "(" expression ")" | prefix_search | TEXT | QUOTED_STRING
//! prefix_search → PREFIX value
//! ```
//!
//! Two adjacent primaries without an operator are joined with AND.
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `!` / `NOT`
//! 3. AND: `&` / `AND` / adjacency
//! 4. OR: `|` / `OR`
//!
//! # Recovery
//!
//! Parsing never aborts. Each rule returns `Option<QueryNode>` and records
//! problems in a shared error list, so a malformed query still yields the
//! best tree the parser could build alongside every error it found.
//! Tokens left over after a failed operand are not reported again.
//!
//! Groups nest at most [`MAX_NESTING`] deep; deeper input is rejected with a
//! single error instead of recursing further.

use tracing::debug;

use crate::{
    ast::{CompareOp, QueryNode, SearchField},
    error::ParseError,
    field::{Field, jlpt_rank},
    lexer::{Token, TokenKind, tokenize},
};

/// Deepest group nesting the parser accepts.
pub const MAX_NESTING: usize = 100;

/// The result of parsing: a tree (if any) and every error found.
///
/// `ast == None` with no errors means the query was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Root of the parsed tree.
    pub ast: Option<QueryNode>,
    /// Syntax errors, in the order they were found.
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    /// True when the query was empty: no tree and no errors.
    pub fn is_empty(&self) -> bool {
        self.ast.is_none() && self.errors.is_empty()
    }

}

/// Recursive descent parser for query expressions.
struct Parser<'a> {
    /// Token stream to parse.
    tokens: &'a [Token],
    /// Current position in the token stream.
    position: usize,
    /// Stand-in returned by `peek` once the stream is exhausted.
    eof: Token,
    /// Errors collected so far.
    errors: Vec<ParseError>,
    /// Groups currently open.
    depth: usize,
    /// Set once nesting passed [`MAX_NESTING`] and the rest of the input was dropped.
    too_deep: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over a token stream.
    fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |t| t.position);
        Self {
            tokens,
            position: 0,
            eof: Token::new(TokenKind::Eof, "", end),
            errors: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    /// Parses the token stream.
    fn parse(mut self) -> ParseOutcome {
        if self.check(TokenKind::Eof) {
            return ParseOutcome::default();
        }

        let ast = self.parse_expression();

        if !self.check(TokenKind::Eof) && self.errors.is_empty() {
            let token = self.peek().clone();
            self.error_at(format!("Unexpected token: {token}"), &token);
        }

        ParseOutcome {
            ast,
            errors: self.errors,
        }
    }

    /// Parses: expression → or_expr
    fn parse_expression(&mut self) -> Option<QueryNode> {
        self.parse_or_expr()
    }

    /// Parses: or_expr → and_expr (OR and_expr)*
    fn parse_or_expr(&mut self) -> Option<QueryNode> {
        let mut left = self.parse_and_expr()?;

        while self.check(TokenKind::Or) {
            self.advance();
            let before = self.errors.len();
            match self.parse_and_expr() {
                Some(right) => left = QueryNode::or(left, right),
                None => {
                    self.missing_operand(before, "Expected expression after OR operator");
                    return Some(left);
                }
            }
        }

        Some(left)
    }

    /// Parses: and_expr → not_expr (AND? not_expr)*
    fn parse_and_expr(&mut self) -> Option<QueryNode> {
        let mut left = self.parse_not_expr()?;

        loop {
            if self.check(TokenKind::And) {
                self.advance();
                let before = self.errors.len();
                match self.parse_not_expr() {
                    Some(right) => left = QueryNode::and(left, right),
                    None => {
                        self.missing_operand(before, "Expected expression after AND operator");
                        return Some(left);
                    }
                }
            } else if self.can_start_operand() {
                // Every token accepted here is consumed even when the operand
                // fails, so the loop always makes progress.
                if let Some(right) = self.parse_not_expr() {
                    left = QueryNode::and(left, right);
                }
            } else {
                break;
            }
        }

        Some(left)
    }

    /// Parses: not_expr → NOT primary | primary
    fn parse_not_expr(&mut self) -> Option<QueryNode> {
        if !self.check(TokenKind::Not) {
            return self.parse_primary();
        }

        self.advance();
        let before = self.errors.len();
        match self.parse_primary() {
            Some(operand) => Some(QueryNode::not(operand)),
            None => {
                self.missing_operand(before, "Expected expression after NOT operator");
                None
            }
        }
    }

    /// Parses: primary → "(" expression ")" | prefix_search | TEXT | QUOTED_STRING
    ///
    /// Returns None without recording an error when the current token cannot
    /// start a primary; the caller knows what was expected.
    fn parse_primary(&mut self) -> Option<QueryNode> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::LParen => self.parse_group(),
            TokenKind::Prefix(field) => {
                self.advance();
                self.parse_prefix_search(field, &token)
            }
            TokenKind::UnknownPrefix => {
                self.advance();
                self.error_at(format!("Unknown prefix: {}", token.value), &token);
                if self.can_be_value() {
                    self.advance();
                }
                None
            }
            TokenKind::Text | TokenKind::QuotedString => {
                self.advance();
                let exact = token.kind == TokenKind::QuotedString;
                Some(QueryNode::search(SearchField::Default, token.value, exact))
            }
            TokenKind::Error => {
                self.advance();
                self.error_at(token.value.clone(), &token);
                None
            }
            _ => None,
        }
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Option<QueryNode> {
        if self.depth >= MAX_NESTING {
            let token = self.peek().clone();
            self.error_at("Query nested too deeply", &token);
            self.too_deep = true;
            self.position = self.tokens.len();
            return None;
        }

        self.depth += 1;
        let group = self.parse_group_body();
        self.depth -= 1;
        group
    }

    /// Parses `( expression )` once the nesting depth has been checked.
    fn parse_group_body(&mut self) -> Option<QueryNode> {
        self.advance(); // (

        if self.check(TokenKind::RParen) {
            let token = self.advance();
            self.error_at("Expected expression inside parentheses", &token);
            return None;
        }

        let before = self.errors.len();
        let inner = self.parse_expression();
        if inner.is_none() {
            self.missing_operand(before, "Expected expression inside parentheses");
        }

        if self.check(TokenKind::RParen) {
            self.advance();
        } else if !self.too_deep {
            let token = self.peek().clone();
            self.error_at("Expected closing parenthesis", &token);
        }

        inner.map(QueryNode::group)
    }

    /// Parses the value following a field prefix.
    fn parse_prefix_search(&mut self, field: Field, prefix: &Token) -> Option<QueryNode> {
        match field {
            Field::Frequency => self.parse_numeric_value(field, prefix),
            Field::JlptLevel if self.peek().kind.is_comparison() => self.parse_jlpt_comparison(),
            _ => self.parse_text_value(field, prefix),
        }
    }

    /// Parses `<op> NUMBER`, `MIN-MAX` or a bare `NUMBER` after a numeric prefix.
    fn parse_numeric_value(&mut self, field: Field, prefix: &Token) -> Option<QueryNode> {
        let next = self.peek().clone();

        if let Some(op) = comparison_op(next.kind) {
            self.advance();
            if !self.check(TokenKind::Number) {
                let token = self.peek().clone();
                self.error_at("Expected number after comparison operator", &token);
                return None;
            }
            let number = self.advance();
            let value = self.number(&number, &number.value)?;
            return Some(QueryNode::Comparison { op, field, value });
        }

        match next.kind {
            TokenKind::Range => {
                self.advance();
                let (min, max) = next.value.split_once('-')?;
                let min = self.number(&next, min)?;
                let max = self.number(&next, max)?;
                Some(QueryNode::Range { field, min, max })
            }
            TokenKind::Number => {
                self.advance();
                let value = self.number(&next, &next.value)?;
                Some(QueryNode::Comparison {
                    op: CompareOp::Eq,
                    field,
                    value,
                })
            }
            _ => self.parse_text_value(field, prefix),
        }
    }

    /// Parses `<op> N<level>` after `jlpt:`.
    fn parse_jlpt_comparison(&mut self) -> Option<QueryNode> {
        let op_token = self.advance();
        let op = comparison_op(op_token.kind)?;

        if !self.check(TokenKind::Text) {
            let token = self.peek().clone();
            self.error_at(
                "Expected JLPT level (e.g., N3) after comparison operator",
                &token,
            );
            return None;
        }

        let level = self.advance();
        match jlpt_rank(&level.value) {
            Some(rank) => Some(QueryNode::Comparison {
                op,
                field: Field::JlptLevel,
                value: u64::from(rank),
            }),
            None => {
                self.error_at(
                    format!("Invalid JLPT level: {}. Use N1-N5", level.value),
                    &level,
                );
                None
            }
        }
    }

    /// Parses a TEXT or QUOTED_STRING value after a prefix.
    fn parse_text_value(&mut self, field: Field, prefix: &Token) -> Option<QueryNode> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Text | TokenKind::QuotedString => {
                self.advance();
                let exact = token.kind == TokenKind::QuotedString;
                Some(QueryNode::search(SearchField::Field(field), token.value, exact))
            }
            _ => {
                self.error_at(format!("Expected value after {}:", prefix.value), &token);
                None
            }
        }
    }

    /// Parses a digit string, recording an error when it does not fit in a `u64`.
    fn number(&mut self, token: &Token, digits: &str) -> Option<u64> {
        match digits.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.error_at(format!("Invalid number: {digits}"), token);
                None
            }
        }
    }

    /// Records a missing-operand error unless the failed operand already reported one.
    fn missing_operand(&mut self, errors_before: usize, message: &str) {
        if self.errors.len() == errors_before {
            let token = self.peek().clone();
            self.error_at(message, &token);
        }
    }

    /// Checks if the current token can begin an operand of an implicit AND.
    fn can_start_operand(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Text
                | TokenKind::QuotedString
                | TokenKind::Prefix(_)
                | TokenKind::UnknownPrefix
                | TokenKind::LParen
                | TokenKind::Not
                | TokenKind::Error
        )
    }

    /// Checks if the current token could be the value of a prefix.
    fn can_be_value(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Text | TokenKind::QuotedString | TokenKind::Number | TokenKind::Range
        )
    }

    /// Records an error pointing at `token`.
    fn error_at(&mut self, message: impl Into<String>, token: &Token) {
        self.errors.push(ParseError::at_token(message, token));
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    /// Checks if the current token is of the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token and returns it. Never moves past Eof.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }
}

/// Maps a comparison token to its operator.
fn comparison_op(kind: TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Lt => Some(CompareOp::Lt),
        TokenKind::Gt => Some(CompareOp::Gt),
        TokenKind::Lte => Some(CompareOp::Lte),
        TokenKind::Gte => Some(CompareOp::Gte),
        _ => None,
    }
}

/// Parses a token stream into an AST plus any syntax errors.
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    let outcome = Parser::new(tokens).parse();
    debug!(
        has_ast = outcome.ast.is_some(),
        errors = outcome.errors.len(),
        "parsed query"
    );
    outcome
}

/// Tokenizes and parses a query string.
pub fn parse_query(input: &str) -> ParseOutcome {
    parse(&tokenize(input))
}
