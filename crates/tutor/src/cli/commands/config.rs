//! Implementation of `tutor config`.

use std::process::ExitCode;

use tutor_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            print!("{}", Highlighter::new().highlight_toml(&toml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to render settings: {e}");
            ExitCode::FAILURE
        }
    }
}
