//! CLI support for the `tutor` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

pub use context::CommandContext;
