//! Implementation of `tutor topics`.

use std::process::ExitCode;

use crate::cli::{
    args::TopicsCommand,
    context::CommandContext,
    output::{dim, format_topic_summary, print_json},
};

/// Lists topics in knowledge-base order.
pub fn run(ctx: &CommandContext, cmd: &TopicsCommand) -> ExitCode {
    let kb = match ctx.knowledge_base(None) {
        Ok(kb) => kb,
        Err(code) => return code,
    };

    let topics = kb.list_topics();
    if cmd.json {
        return print_json(&topics);
    }

    if topics.is_empty() {
        println!("{}", dim("No topics found."));
        return ExitCode::SUCCESS;
    }

    for topic in &topics {
        println!("{}", format_topic_summary(topic, cmd.long));
        if cmd.long {
            println!();
        }
    }

    ExitCode::SUCCESS
}
