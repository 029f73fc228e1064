//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod inspect;
pub mod search;
pub mod status;
pub mod suggest;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Check(cmd) => check::run(&cmd),
        Commands::Suggest(cmd) => suggest::run(&cmd),
        Commands::Inspect { what } => inspect::run(what),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
