//! Implementation of `kanji suggest`.

use std::process::ExitCode;

use kanji_query::get_suggestions;

use crate::cli::args::SuggestCommand;

/// Prints one completion per line for the word at the cursor.
pub fn run(cmd: &SuggestCommand) -> ExitCode {
    let cursor = cmd
        .cursor
        .unwrap_or_else(|| cmd.query.chars().count());

    for suggestion in get_suggestions(&cmd.query, cursor) {
        println!("{suggestion}");
    }

    ExitCode::SUCCESS
}
