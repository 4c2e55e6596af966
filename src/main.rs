//! keyprompt CLI
//!
//! Run interactive surveys in the terminal and print the answers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crossterm::style::Color;
use tracing_subscriber::EnvFilter;

use keyprompt::prompt::theme::paint;
use keyprompt::report::format_answers;
use keyprompt::terminal::{CrosstermTerminal, install_panic_hook, restore_terminal};
use keyprompt::types::OutputFormat;
use keyprompt::{Answer, AnswerSet, Item, PromptError, Prompter, StepSurvey, Survey, Theme};

/// Exit status after Ctrl-C, as a shell would report SIGINT.
const EXIT_ABORTED: u8 = 130;

type Term = CrosstermTerminal;

#[derive(Parser)]
#[command(name = "keyprompt")]
#[command(about = "Keypress-driven interactive prompts and surveys")]
#[command(version)]
struct Cli {
    /// Disable colors
    #[arg(long, global = true, env = "NO_COLOR")]
    plain: bool,

    /// Output format for the collected answers
    #[arg(long, value_enum, global = true, default_value = "human")]
    format: OutputFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a survey definition file (JSON) and print the answers
    Run {
        /// Path to a {"questions": [...]} document
        path: PathBuf,
    },

    /// Built-in survey using every prompt kind
    Demo,

    /// Built-in survey whose questions depend on earlier answers
    Branching {
        /// Name used to greet the user
        #[arg(long, default_value = "User")]
        name: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    install_panic_hook();

    let theme = if cli.plain { Theme::plain() } else { Theme::default() };
    let colored = theme.colored;
    let prompter = Prompter::new(CrosstermTerminal::stdout())
        .with_theme(theme)
        .on_abort(|| {
            let _ = restore_terminal();
        });

    let result = match cli.command {
        Commands::Run { path } => cmd_run(path, prompter),
        Commands::Demo => cmd_demo(prompter),
        Commands::Branching { name } => cmd_branching(name, colored, prompter),
    };

    let output = result.and_then(|answers| format_answers(&answers, cli.format.into()));

    match output {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(PromptError::Aborted) => ExitCode::from(EXIT_ABORTED),
        Err(e) => {
            let _ = restore_terminal();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `KEYPROMPT_LOG` (default: errors only).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("KEYPROMPT_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(path: PathBuf, mut prompter: Prompter<Term>) -> Result<AnswerSet, PromptError> {
    let survey = Survey::load(&path)?;
    survey.execute(&mut prompter)
}

fn cmd_demo(mut prompter: Prompter<Term>) -> Result<AnswerSet, PromptError> {
    Survey::new()
        .ask("age", "How old are you?")
        .confirm("yes", "Do you really want to yes?")
        .radio(
            "line",
            "Select line?",
            vec![Item::new("first", 1), Item::new("second", 2)],
        )
        .checkbox(
            "lines",
            "Select lines?",
            vec![
                Item::new("first", 1),
                Item::new("second", 2),
                Item::new("third", 3),
            ],
        )
        .execute(&mut prompter)
}

fn cmd_branching(
    name: String,
    colored: bool,
    prompter: Prompter<Term>,
) -> Result<AnswerSet, PromptError> {
    let mut initial = AnswerSet::new();
    initial.insert("name", Answer::Text(name.clone()));

    let step = StepSurvey::with_answers(prompter, initial)
        .start()?
        .ask("age", &format!("{} how old are you?", name))?;

    let age: u32 = step
        .answers()
        .text("age")
        .and_then(|a| a.trim().parse().ok())
        .unwrap_or(0);

    let step = if age > 33 {
        let step = step.confirm("kek", "Do you really want to kek?")?;
        if step.answers().flag("kek") == Some(true) {
            step.radio(
                "kek-type",
                "Select kek:",
                vec![
                    Item::new("Big", 3),
                    Item::new("Medium", 2),
                    Item::new("Small", 1),
                ],
            )?
        } else {
            step.skip()?
        }
    } else {
        let step = step.confirm("lol", "Do you really want to lol?")?;
        if step.answers().flag("lol") == Some(true) {
            step.radio(
                "lol-type",
                "Select lol:",
                vec![
                    Item::new("Loool", 3),
                    Item::new("Lool", 2),
                    Item::new("Lol", 1),
                ],
            )?
        } else {
            step.skip()?
        }
    };

    let step = if step.answers().flag("kek") == Some(true) {
        step.confirm("good", "Is it good kek?")?
    } else if step.answers().flag("lol") == Some(true) {
        step.confirm("good", "Is it good lol?")?
    } else {
        step.skip()?
    };

    let colors = [("red", Color::Red), ("blue", Color::Blue), ("green", Color::Green)]
        .into_iter()
        .map(|(label, color)| {
            let title = if colored {
                paint(label, Some(color), false)
            } else {
                label.to_string()
            };
            Item::new(title, label)
        })
        .collect();

    let mut step = step.checkbox("colors", "Choose colors", colors)?;
    step.prompter_mut().show_cursor()?;
    Ok(step.into_answers())
}
