//! Implementation of `kanji check`.

use std::process::ExitCode;

use kanji_query::{ParseError, validate_syntax};
use serde::Serialize;

use crate::cli::{
    args::CheckCommand,
    output::{dim, print_diagnostics, print_json, success},
};

/// JSON output for `kanji check`.
#[derive(Serialize)]
struct JsonCheckOutput<'a> {
    /// The query as given.
    query: &'a str,
    /// Whether the query parsed cleanly.
    valid: bool,
    /// Syntax errors, in the order found.
    errors: &'a [ParseError],
}

/// Validates a query's syntax. Fails when the query is invalid.
pub fn run(cmd: &CheckCommand) -> ExitCode {
    let check = validate_syntax(&cmd.query);

    let code = if cmd.output.json {
        print_json(&JsonCheckOutput {
            query: &cmd.query,
            valid: check.valid,
            errors: &check.errors,
        })
    } else {
        if check.valid {
            println!("{}", success("valid"));
        } else if check.errors.is_empty() {
            println!("{}", dim("empty query"));
        } else {
            print_diagnostics(&cmd.query, &check.errors);
        }
        ExitCode::SUCCESS
    };

    if check.valid { code } else { ExitCode::FAILURE }
}
