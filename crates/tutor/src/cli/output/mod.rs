//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use tutor_highlight::Highlighter;
pub use tutor_highlight::{confidence, dim, error, header, subheader, success, warning};
use tutor_match::{ChatResponse, MatchResult, MatchTrace, ResponseKind, TopicSummary};

/// Prints `value` as pretty JSON, highlighted when stdout is a terminal.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match render_json(value, io::stdout().is_terminal()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Serializes `value` as pretty JSON, syntax highlighted when `color` is set.
pub fn render_json<T: Serialize + ?Sized>(value: &T, color: bool) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    if color {
        Ok(Highlighter::new().highlight_json(&json))
    } else {
        Ok(json)
    }
}

/// Formats a reply for the terminal.
pub fn format_response(response: &ChatResponse) -> String {
    match response.kind {
        ResponseKind::Answer => {
            let mut out = response.answer.clone();
            if let (Some(topic), Some(score)) = (&response.topic, response.confidence) {
                out.push('\n');
                out.push_str(&format!(
                    "{} {}",
                    dim(&format!("[{topic}]")),
                    confidence(score)
                ));
            }
            out
        }
        ResponseKind::Fallback => {
            let mut out = warning(&response.answer);
            for suggestion in response.suggestions.iter().flatten() {
                out.push_str(&format!(
                    "\n  {} {}",
                    header(&suggestion.id),
                    dim(&format!("- {}", suggestion.title))
                ));
            }
            out
        }
        ResponseKind::Error => error(&response.answer),
    }
}

/// Formats one topic for `tutor topics`.
pub fn format_topic_summary(topic: &TopicSummary, long: bool) -> String {
    let mut out = format!("{} {}", header(&topic.id), dim(&format!("- {}", topic.title)));
    if long {
        let count = match topic.question_count {
            1 => "1 question".to_string(),
            n => format!("{n} questions"),
        };
        out.push_str(&format!("\n  {}", dim(&count)));
        if !topic.description.is_empty() {
            out.push_str(&format!("\n  {}", topic.description));
        }
    }
    out
}

/// Renders a match trace: each stage as a table, then the reply.
pub fn format_trace(trace: &MatchTrace<'_>) -> String {
    let mut out = String::new();

    let scope = trace.scope.as_deref().unwrap_or("all topics");
    out.push_str(&format!(
        "{} {}\n{} {}\n\n",
        subheader("Query:"),
        trace.query,
        subheader("Scope:"),
        scope
    ));

    if trace.blank {
        out.push_str(&dim("Blank query, matching skipped."));
        out.push_str("\n\n");
    } else {
        out.push_str(&format_stage("Exact and keyword hits:", &trace.keyword_hits));
        if trace.fuzzy_ran {
            out.push_str(&format_stage("Fuzzy hits:", &trace.fuzzy_hits));
        } else {
            out.push_str(&format!(
                "{}\n  {}\n\n",
                subheader("Fuzzy hits:"),
                dim("(skipped, keyword matching found results)")
            ));
        }
        out.push_str(&format_stage("Ranked:", &trace.ranked));
        out.push_str(&format!(
            "{} score > {:.2}\n\n",
            subheader("Accept when:"),
            trace.acceptance_threshold
        ));
    }

    out.push_str(&subheader("Response:"));
    out.push('\n');
    out.push_str(&format_response(&trace.response));
    out
}

/// Renders one stage of a trace as a table.
fn format_stage(title: &str, results: &[MatchResult<'_>]) -> String {
    let mut out = format!("{}\n", subheader(title));
    if results.is_empty() {
        out.push_str(&format!("  {}\n\n", dim("(none)")));
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Score", "Kind", "Topic", "Question"]);
    for result in results {
        table.add_row(vec![
            Cell::new(format!("{:.2}", result.score)),
            Cell::new(result.kind.as_str()),
            Cell::new(result.topic()),
            Cell::new(result.question()),
        ]);
    }
    out.push_str(&format!("{table}\n\n"));
    out
}
