//! Command-line interface for `tutor`.
//!
//! tutor answers free-text questions from a directory of topic files. Questions are
//! matched by exact phrase, by keyword, and finally by fuzzy similarity; when nothing is
//! close enough the reply suggests topics to explore instead.

mod cli;

use std::process::ExitCode;

use cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let context = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };

    match context {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
