//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use kanji_highlight::{caret_line, error, mark_char};
pub use kanji_highlight::{dim, header, subheader, success, warning};
use kanji_query::{Kanji, ParseError, QueryError, Token};
use serde::Serialize;

/// JSON output for `kanji search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as given.
    query: &'a str,
    /// Number of records returned.
    total_matches: usize,
    /// Matching records in input order.
    results: &'a [&'a Kanji],
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints search results as JSON or as a table.
pub fn output_results(query: &str, results: &[&Kanji], json: bool) -> ExitCode {
    if json {
        return print_json(&JsonSearchOutput {
            query,
            total_matches: results.len(),
            results,
        });
    }

    if results.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", results_table(results));
    let noun = if results.len() == 1 { "result" } else { "results" };
    println!("{}", dim(&format!("{} {noun}", results.len())));
    ExitCode::SUCCESS
}

/// Builds the result table.
fn results_table(results: &[&Kanji]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Kanji",
        "Hán Việt",
        "Meaning",
        "Vietnamese",
        "On",
        "Kun",
        "JLPT",
        "Freq",
    ]);

    for kanji in results {
        table.add_row(vec![
            Cell::new(&kanji.kanji),
            Cell::new(&kanji.han_viet),
            Cell::new(&kanji.meaning),
            Cell::new(&kanji.vietnamese_meaning),
            Cell::new(kanji.onyomi.join(", ")),
            Cell::new(kanji.kunyomi.join(", ")),
            Cell::new(&kanji.jlpt_level),
            Cell::new(kanji.frequency.map(|f| f.to_string()).unwrap_or_default()),
        ]);
    }

    table
}

/// Builds a token listing.
pub fn tokens_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Pos", "Kind", "Value"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(token.position),
            Cell::new(token.kind.label()),
            Cell::new(&token.value),
        ]);
    }
    table
}

/// Prints syntax errors to stderr, each with the query and a caret.
pub fn print_query_errors(query: &str, errors: Vec<ParseError>) {
    eprintln!("{}", QueryError::new(query, errors));
}

/// Prints colored diagnostics for `kanji check`.
pub fn print_diagnostics(query: &str, errors: &[ParseError]) {
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", error(&format!("error: {}", err.message)));
        println!("  {}", mark_char(query, err.position));
        println!("  {}", caret_line(query, err.position));
        if let Some(hint) = err.suggestion() {
            println!("{}", dim(&format!("hint: {hint}")));
        }
    }
}
