//! Implementation of `tutor chat`.
//!
//! Reads one question per line from stdin and answers each independently. The only
//! state kept between lines is the topic scope chosen with `/topic`.

use std::{
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
};

use tutor_match::KnowledgeBase;

use crate::cli::{
    args::ChatCommand,
    context::{CommandContext, check_scope},
    output::{dim, error, format_response, format_topic_summary, success},
};

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// A question to answer.
    Question(&'a str),
    /// `/topic ID`.
    SetScope(&'a str),
    /// `/topic` with no id.
    ClearScope,
    /// `/topics`.
    ListTopics,
    /// `/quit` or `/exit`.
    Quit,
    /// Any other slash command.
    Unknown(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a raw input line.
    fn parse(line: &'a str) -> Self {
        let Some(command) = line.trim().strip_prefix('/') else {
            return Self::Question(line);
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("topic"), Some(id)) => Self::SetScope(id),
            (Some("topic"), None) => Self::ClearScope,
            (Some("topics"), None) => Self::ListTopics,
            (Some("quit" | "exit"), None) => Self::Quit,
            _ => Self::Unknown(line.trim()),
        }
    }
}

/// Runs the line-oriented session until EOF or `/quit`.
pub fn run(ctx: &CommandContext, cmd: &ChatCommand) -> ExitCode {
    let kb = match ctx.knowledge_base(cmd.answer.seed) {
        Ok(kb) => kb,
        Err(code) => return code,
    };

    if let Err(code) = check_scope(&kb, cmd.answer.topic.as_deref()) {
        return code;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("{}", dim("Ask a question. /topics lists topics, /quit leaves."));
    }

    let mut session = Session {
        kb: &kb,
        scope: cmd.answer.topic.clone(),
    };

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", session.prompt());
            if let Err(e) = io::stdout().flush() {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
            None => break,
        };

        if !session.handle(&line) {
            break;
        }
    }

    ExitCode::SUCCESS
}

/// Per-session state.
struct Session<'kb> {
    /// Knowledge base answering questions.
    kb: &'kb KnowledgeBase,
    /// Current topic restriction.
    scope: Option<String>,
}

impl Session<'_> {
    /// Prompt showing the current scope.
    fn prompt(&self) -> String {
        match &self.scope {
            Some(id) => format!("{id}>"),
            None => ">".to_string(),
        }
    }

    /// Handles one line, printing the result. Returns false when the session ends.
    fn handle(&mut self, line: &str) -> bool {
        match Line::parse(line) {
            Line::Question(question) => {
                let response = self.kb.respond(question, self.scope.as_deref());
                println!("{}", format_response(&response));
                println!();
            }
            Line::SetScope(id) => match self.kb.topic(id) {
                Ok(topic) => {
                    println!("{}", success(&format!("Topic set to {}.", topic.title)));
                    self.scope = Some(topic.id.clone());
                }
                Err(e) => println!("{}", error(&e.to_string())),
            },
            Line::ClearScope => {
                println!("{}", success("Searching all topics."));
                self.scope = None;
            }
            Line::ListTopics => {
                for topic in self.kb.list_topics() {
                    println!("{}", format_topic_summary(&topic, false));
                }
            }
            Line::Quit => return false,
            Line::Unknown(command) => {
                println!("{}", error(&format!("unknown command: {command}")));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        assert_eq!(Line::parse("what is a prior"), Line::Question("what is a prior"));
        assert_eq!(Line::parse("  "), Line::Question("  "));
        assert_eq!(Line::parse("/topic bayes-theorem"), Line::SetScope("bayes-theorem"));
        assert_eq!(Line::parse(" /topic "), Line::ClearScope);
        assert_eq!(Line::parse("/topics"), Line::ListTopics);
        assert_eq!(Line::parse("/quit"), Line::Quit);
        assert_eq!(Line::parse("/exit"), Line::Quit);
        assert_eq!(Line::parse("/dance now"), Line::Unknown("/dance now"));
    }
}
