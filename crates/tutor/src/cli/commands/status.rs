//! Implementation of `tutor status`.

use std::process::ExitCode;

use tutor_config::{discover_config_files, format_path_for_display};
use tutor_corpus::load_knowledge;
use tutor_match::KnowledgeBase;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the knowledge directory, what loaded, and any warnings.
///
/// Exits with failure when anything needs attention.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = ctx.cwd.as_path();
    let config = &ctx.config;
    let mut issues: Vec<String> = Vec::new();

    println!("{}", subheader("Config files:"));
    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!(
            "   {} {}",
            dim("(none, using defaults)"),
            dim("run 'tutor init' to create one")
        );
    }
    for path in &config_files {
        println!("   {}", format_path_for_display(path, Some(cwd)));
    }
    println!();

    let dir = ctx.knowledge_dir();
    println!("{}", subheader("Knowledge:"));
    println!(
        "   {}",
        format_path_for_display(&dir, config.config_root.as_deref().or(Some(cwd)))
    );

    issues.extend(config.validate(cwd).iter().map(ToString::to_string));

    if dir.is_dir() {
        match load_knowledge(&dir, &config.knowledge.topics, false) {
            Ok(knowledge) => {
                for skipped in &knowledge.report.skipped {
                    issues.push(format!("topic '{}' skipped: {}", skipped.id, skipped.reason));
                }

                let topic_count = knowledge.topics.len();
                match KnowledgeBase::new(knowledge.topics, config.matching.clone()) {
                    Ok(kb) => {
                        let index = kb.index();
                        println!(
                            "   {}",
                            dim(&format!(
                                "{topic_count} topics, {} questions, {} distinct words",
                                index.len(),
                                index.vocabulary_len()
                            ))
                        );
                        for question in index.duplicate_questions() {
                            issues.push(format!("duplicate question: {question}"));
                        }
                    }
                    Err(e) => issues.push(format!("knowledge cannot be indexed: {e}")),
                }
            }
            Err(e) => issues.push(e.to_string()),
        }
    }
    println!();

    if issues.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", issues.len())));
    for issue in &issues {
        println!("   {}", warning(issue));
    }

    ExitCode::FAILURE
}
