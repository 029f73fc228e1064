//! Command-line interface for the `kanji` query tool.

use std::process::ExitCode;

use clap::Parser;
use kanji::cli::{
    CommandContext,
    args::Cli,
    commands, logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
