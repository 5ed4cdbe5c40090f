//! Working directory and configuration shared by every command.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tracing::warn;
use tutor_config::Config;
use tutor_corpus::{Knowledge, load_knowledge};
use tutor_match::{KnowledgeBase, SeededPicker};

/// State resolved once at startup and handed to the selected command.
pub struct CommandContext {
    /// Directory tutor was started in.
    pub cwd: PathBuf,
    /// Layered configuration; the defaults when no `.tutor.toml` applies.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and loads its configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Resolves the working directory without reading any config file.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Directory topic files are read from.
    pub fn knowledge_dir(&self) -> PathBuf {
        self.config.knowledge_dir(&self.cwd)
    }

    /// Reads the topic files named by the configuration.
    pub fn load_knowledge(&self) -> Result<Knowledge, ExitCode> {
        let dir = self.knowledge_dir();
        let settings = &self.config.knowledge;
        load_knowledge(&dir, &settings.topics, settings.strict).map_err(|e| {
            eprintln!("error: failed to load knowledge: {e}");
            if !dir.exists() {
                eprintln!("Run 'tutor init' and point [knowledge] path at your topic files.");
            }
            ExitCode::FAILURE
        })
    }

    /// Loads topics and builds the knowledge base.
    ///
    /// With a `seed`, fallback messages are chosen reproducibly.
    pub fn knowledge_base(&self, seed: Option<u64>) -> Result<KnowledgeBase, ExitCode> {
        let knowledge = self.load_knowledge()?;
        for skipped in &knowledge.report.skipped {
            warn!(topic = %skipped.id, reason = %skipped.reason, "topic not loaded");
        }

        let kb = KnowledgeBase::new(knowledge.topics, self.config.matching.clone()).map_err(|e| {
            eprintln!("error: failed to index knowledge: {e}");
            ExitCode::FAILURE
        })?;

        Ok(match seed {
            Some(seed) => kb.with_picker(SeededPicker::new(seed)),
            None => kb,
        })
    }
}

/// Working directory, or a failure exit code after printing the error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Layered configuration for `cwd`, or a failure exit code after printing the error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Fails with a not-found message when `scope` names no loaded topic.
pub fn check_scope(kb: &KnowledgeBase, scope: Option<&str>) -> Result<(), ExitCode> {
    if let Some(id) = scope
        && let Err(e) = kb.topic(id)
    {
        eprintln!("error: {e}");
        eprintln!("Run 'tutor topics' to list available topics.");
        return Err(ExitCode::FAILURE);
    }
    Ok(())
}
