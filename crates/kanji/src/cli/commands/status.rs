//! Implementation of `kanji status`.

use std::process::ExitCode;

use kanji_config::{ConfigWarning, discover_config_files, format_path_for_display, is_global_config};

use crate::{
    cli::{
        context::CommandContext,
        output::{dim, subheader, warning},
    },
    data::load_records,
};

/// Shows configuration files, data files with record counts, and warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("kanji init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        let scope = if is_global_config(path) { "global" } else { "local" };
        let display_path = format_path_for_display(path, Some(cwd));
        println!("   {display_path} {}", dim(&format!("({scope})")));
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Data files:"));
    if config.data.files.is_empty() {
        println!("   {}", dim("(none configured)"));
    }
    for path in &config.data.files {
        let display_path = format_path_for_display(path, Some(cwd));
        if !path.is_file() {
            println!("   {display_path} {}", warning("[missing]"));
            continue;
        }
        match load_records(path) {
            Ok(records) => println!(
                "   {display_path} {}",
                dim(&format!("({} records)", records.len()))
            ),
            Err(e) => println!("   {display_path} {}", warning(&format!("[{e}]"))),
        }
    }
    println!();

    println!("{}", subheader("Search:"));
    println!("   limit = {}", config.effective_limit());
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::SUCCESS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoDataFiles => {
                println!("{}", dim("Hint: add files = [\"kanji.json\"] under [data] in .kanji.toml"));
            }
            ConfigWarning::LimitAboveCap { cap, .. } => {
                println!("{}", dim(&format!("Hint: set [search] limit to {cap} or less")));
            }
            _ => {}
        }
    }
}
