//! Implementation of `tutor init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tutor_config::{
    CONFIG_FILENAME, DEFAULT_KNOWLEDGE_DIR, global_config_path, global_template, local_template,
};
use tutor_highlight::{Highlighter, indent_content};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// Where `init` writes, and which template it uses.
enum Target {
    /// `.tutor.toml` in the working directory.
    Local(PathBuf),
    /// `~/.tutor.toml`.
    Global(PathBuf),
}

impl Target {
    /// Picks the global file when asked to, or when run from the home directory.
    fn select(cwd: &Path, global: bool) -> Option<Self> {
        let global_path = global_config_path();
        let in_home = global_path
            .as_deref()
            .and_then(Path::parent)
            .is_some_and(|home| home == cwd);

        if global || in_home {
            global_path.map(Self::Global)
        } else {
            Some(Self::Local(cwd.join(CONFIG_FILENAME)))
        }
    }

    /// File to write.
    fn path(&self) -> &Path {
        match self {
            Self::Local(path) | Self::Global(path) => path,
        }
    }

    /// Template contents.
    fn template(&self) -> &'static str {
        match self {
            Self::Local(_) => local_template(),
            Self::Global(_) => global_template(),
        }
    }
}

/// Writes a starter `.tutor.toml`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some(target) = Target::select(&ctx.cwd, cmd.global) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };
    let path = target.path();

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    if let Err(e) = fs::write(path, template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    println!(
        "{}",
        indent_content(&Highlighter::new().highlight_toml(template))
    );

    if matches!(target, Target::Local(_)) && !ctx.cwd.join(DEFAULT_KNOWLEDGE_DIR).exists() {
        println!();
        println!(
            "{}",
            dim(&format!(
                "Add topic files to {DEFAULT_KNOWLEDGE_DIR}/ (one <topic-id>.json per topic)."
            ))
        );
    }

    ExitCode::SUCCESS
}
