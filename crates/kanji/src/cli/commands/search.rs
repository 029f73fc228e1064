//! Implementation of `kanji search`.

use std::process::ExitCode;

use kanji_query::{execute_query_with_limit, parse_query, tokenize};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, output_results, print_query_errors, subheader, tokens_table},
};

/// Runs a query against the selected data files and prints the matches.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    if cmd.explain {
        return explain(&cmd.query);
    }

    let records = match ctx.records(&cmd.data) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    debug!(query = %cmd.query, limit, records = records.len(), "searching");

    let outcome = execute_query_with_limit(&cmd.query, &records, limit);
    if !outcome.errors.is_empty() {
        print_query_errors(&cmd.query, outcome.errors);
        return ExitCode::FAILURE;
    }

    output_results(&cmd.query, &outcome.results, cmd.output.json)
}

/// Prints the tokens and parse tree for a query without searching.
fn explain(query: &str) -> ExitCode {
    println!("{}", subheader("Query:"));
    println!("   {query}");
    println!();

    println!("{}", subheader("Tokens:"));
    println!("{}", tokens_table(&tokenize(query)));
    println!();

    let outcome = parse_query(query);
    if !outcome.errors.is_empty() {
        print_query_errors(query, outcome.errors);
        return ExitCode::FAILURE;
    }

    match outcome.ast {
        Some(ast) => {
            println!("{}", subheader("Parsed AST:"));
            for line in ast.to_string().lines() {
                println!("   {line}");
            }
            println!();
            println!("{}", subheader("Normalized:"));
            println!("   {}", ast.to_query_string());
        }
        None => println!("{}", dim("(empty query)")),
    }

    ExitCode::SUCCESS
}
