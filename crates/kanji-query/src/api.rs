//! Entry points used by callers: run a query, or only check its syntax.

use serde::Serialize;
use tracing::debug;

use crate::{error::ParseError, eval::filter_records, parser::parse_query, record::Record};

/// Maximum number of records a query returns.
pub const RESULT_LIMIT: usize = 50;

/// Matches and errors from running a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome<'a, R> {
    /// Matching records in input order, at most [`RESULT_LIMIT`].
    pub results: Vec<&'a R>,
    /// Syntax errors. Non-empty implies `results` is empty.
    pub errors: Vec<ParseError>,
}

/// Result of a syntax check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxCheck {
    /// True when the query parsed to a tree with no errors.
    pub valid: bool,
    /// Syntax errors found.
    pub errors: Vec<ParseError>,
}

/// Runs `query` against `records` and returns the first 50 matches.
///
/// A query with any syntax error matches nothing; there is no partial
/// evaluation. An empty query also matches nothing, but reports no errors.
pub fn execute_query<'a, R: Record>(query: &str, records: &'a [R]) -> QueryOutcome<'a, R> {
    execute_query_with_limit(query, records, RESULT_LIMIT)
}

/// Like [`execute_query`] but keeps at most `limit` matches.
///
/// `limit` can only lower the cap: values above [`RESULT_LIMIT`] are clamped.
pub fn execute_query_with_limit<'a, R: Record>(
    query: &str,
    records: &'a [R],
    limit: usize,
) -> QueryOutcome<'a, R> {
    let outcome = parse_query(query);

    let ast = match outcome.ast {
        Some(ast) if outcome.errors.is_empty() => ast,
        _ => {
            return QueryOutcome {
                results: Vec::new(),
                errors: outcome.errors,
            };
        }
    };

    let results: Vec<&R> = filter_records(&ast, records)
        .take(limit.min(RESULT_LIMIT))
        .collect();
    debug!(
        records = records.len(),
        matches = results.len(),
        "executed query"
    );

    QueryOutcome {
        results,
        errors: Vec::new(),
    }
}

/// Checks a query's syntax without evaluating it.
///
/// An empty or whitespace-only query is reported as invalid (no tree) even
/// though it carries no errors and [`execute_query`] accepts it silently.
pub fn validate_syntax(query: &str) -> SyntaxCheck {
    let outcome = parse_query(query);
    SyntaxCheck {
        valid: outcome.errors.is_empty() && outcome.ast.is_some(),
        errors: outcome.errors,
    }
}
