//! Clap argument definitions for the `tutor` CLI.

use std::{env, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "tutor", version)]
#[command(about = "Tutor - answers questions from a topic knowledge base")]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by commands that answer questions.
#[derive(Args, Debug, Clone, Default)]
pub struct AnswerArgs {
    /// Restrict exact and keyword matching to one topic
    #[arg(short = 't', long = "topic", value_name = "ID")]
    pub topic: Option<String>,

    /// Seed the fallback message choice for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for `tutor ask`.
#[derive(Args, Debug, Clone)]
pub struct AskCommand {
    /// The question; multiple words are joined with spaces
    #[arg(required = true)]
    pub question: Vec<String>,

    #[command(flatten)]
    /// Scope and seed flags.
    pub answer: AnswerArgs,

    /// Output the response as JSON
    #[arg(long)]
    pub json: bool,

    /// Show every matching stage instead of just the reply
    #[arg(long)]
    pub explain: bool,
}

impl AskCommand {
    /// The question as a single string.
    pub fn query(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for `tutor chat`.
#[derive(Args, Debug, Clone)]
pub struct ChatCommand {
    #[command(flatten)]
    /// Scope and seed flags.
    pub answer: AnswerArgs,
}

/// Arguments for `tutor topics`.
#[derive(Args, Debug, Clone)]
pub struct TopicsCommand {
    /// Show descriptions and question counts
    #[arg(short = 'l', long)]
    pub long: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tutor topic`.
#[derive(Args, Debug, Clone)]
pub struct TopicCommand {
    /// Topic id
    pub id: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tutor init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.tutor.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `tutor` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single question
    #[command(after_help = "\
EXAMPLES:
  tutor ask what is bayes theorem
  tutor ask -t production-rules forward chaining
  tutor ask --json 'what is a prior?'
  tutor ask --explain bayse theorem")]
    Ask(AskCommand),

    /// Answer questions read line by line from stdin
    #[command(after_help = "\
SESSION COMMANDS:
  /topic ID    Restrict matching to a topic
  /topic       Clear the topic restriction
  /topics      List topics
  /quit        Leave the session")]
    Chat(ChatCommand),

    /// List topics in knowledge-base order
    Topics(TopicsCommand),

    /// Show one topic and its questions
    Topic(TopicCommand),

    /// Initialize tutor configuration in current directory
    Init(InitCommand),

    /// Show status and validate configuration and knowledge
    Status,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_help();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: tutor [-v...] <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {:10} {about}", sub.get_name());
    }
    println!();
    println!("Options:");
    println!("  -v, --verbose  Increase log verbosity");
    println!("  -h, --help     Print help");
    println!("  -V, --version  Print version");
}
