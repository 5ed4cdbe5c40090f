//! Implementation of `tutor topic`.

use std::process::ExitCode;

use tutor_corpus::Topic;

use crate::cli::{
    args::TopicCommand,
    context::CommandContext,
    output::{dim, header, print_json, subheader},
};

/// Shows one topic with its questions.
pub fn run(ctx: &CommandContext, cmd: &TopicCommand) -> ExitCode {
    let kb = match ctx.knowledge_base(None) {
        Ok(kb) => kb,
        Err(code) => return code,
    };

    let topic = match kb.topic(&cmd.id) {
        Ok(topic) => topic,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(topic);
    }

    print!("{}", format_topic(topic));
    ExitCode::SUCCESS
}

/// Formats a topic with every question, answer and keyword list.
fn format_topic(topic: &Topic) -> String {
    let mut out = format!("{} {}\n", header(&topic.title), dim(&format!("({})", topic.id)));
    if !topic.description.is_empty() {
        out.push_str(&format!("{}\n", topic.description));
    }
    out.push('\n');

    if topic.questions.is_empty() {
        out.push_str(&format!("{}\n", dim("No questions.")));
        return out;
    }

    for record in &topic.questions {
        out.push_str(&format!("{}\n", subheader(&record.question)));
        out.push_str(&format!("  {}\n", record.answer));
        if !record.keywords.is_empty() {
            out.push_str(&format!(
                "  {}\n",
                dim(&format!("keywords: {}", record.keywords.join(", ")))
            ));
        }
        out.push('\n');
    }
    out
}
