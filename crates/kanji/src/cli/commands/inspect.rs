//! Implementation of `kanji inspect`.

use std::process::ExitCode;

use kanji_query::{parse_query, tokenize};

use crate::cli::{
    args::InspectWhat,
    output::{dim, print_json, print_query_errors, tokens_table},
};

/// Shows the tokens or the parse tree of a query.
pub fn run(what: InspectWhat) -> ExitCode {
    match what {
        InspectWhat::Tokens { query, output } => cmd_inspect_tokens(&query, output.json),
        InspectWhat::Ast { query, output } => cmd_inspect_ast(&query, output.json),
    }
}

/// Implements `kanji inspect tokens`. Lexical errors show up as ERROR tokens.
fn cmd_inspect_tokens(query: &str, json: bool) -> ExitCode {
    let tokens = tokenize(query);
    if json {
        return print_json(&tokens);
    }
    println!("{}", tokens_table(&tokens));
    ExitCode::SUCCESS
}

/// Implements `kanji inspect ast`.
fn cmd_inspect_ast(query: &str, json: bool) -> ExitCode {
    let outcome = parse_query(query);
    if !outcome.errors.is_empty() {
        print_query_errors(query, outcome.errors);
        return ExitCode::FAILURE;
    }

    if json {
        return print_json(&outcome.ast);
    }

    match outcome.ast {
        Some(ast) => print!("{ast}"),
        None => println!("{}", dim("(empty query)")),
    }
    ExitCode::SUCCESS
}
