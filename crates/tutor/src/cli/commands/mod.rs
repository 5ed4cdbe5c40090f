//! Command implementations and dispatch.

pub mod ask;
pub mod chat;
pub mod config;
pub mod init;
pub mod status;
pub mod topic;
pub mod topics;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Ask(cmd) => ask::run(ctx, &cmd),
        Commands::Chat(cmd) => chat::run(ctx, &cmd),
        Commands::Topics(cmd) => topics::run(ctx, &cmd),
        Commands::Topic(cmd) => topic::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
