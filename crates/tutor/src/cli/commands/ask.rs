//! Implementation of `tutor ask`.

use std::process::ExitCode;

use tutor_match::ResponseKind;

use crate::cli::{
    args::AskCommand,
    context::{CommandContext, check_scope},
    output::{format_response, format_trace, print_json},
};

/// Answers one question.
///
/// Exits with failure only when the query could not be processed; a fallback reply is
/// still a successful run.
pub fn run(ctx: &CommandContext, cmd: &AskCommand) -> ExitCode {
    let kb = match ctx.knowledge_base(cmd.answer.seed) {
        Ok(kb) => kb,
        Err(code) => return code,
    };

    let scope = cmd.answer.topic.as_deref();
    if let Err(code) = check_scope(&kb, scope) {
        return code;
    }

    let query = cmd.query();
    let trace = kb.explain(&query, scope);

    let failed = trace.response.kind == ResponseKind::Error;

    if cmd.json {
        let printed = if cmd.explain {
            print_json(&trace)
        } else {
            print_json(&trace.response)
        };
        return if failed { ExitCode::FAILURE } else { printed };
    }

    if cmd.explain {
        println!("{}", format_trace(&trace));
    } else {
        println!("{}", format_response(&trace.response));
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
