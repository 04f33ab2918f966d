use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use retrocalc::calculator::{
    HistoryEntry, Mode, Session, clipboard_text, copy_to_clipboard, group_digits, parse_keys,
};
use retrocalc::config::Config;
use retrocalc::notes::{JsonFileStore, Note, NoteBook};

#[derive(Parser)]
#[command(name = "retrocalc", version, about = "A retro pocket calculator")]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Press a sequence of keys and print the display, e.g. `3 + 4 =`
    ///
    /// A lone `-` is the subtract key. Write other keys that start with a
    /// hyphen after `--`, or glue them to a neighbour (`3-4=`).
    Keys {
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Print the history after the display
        #[arg(long)]
        history: bool,

        /// Print display, mode, memory and history as JSON
        #[arg(long)]
        json: bool,

        /// Copy the final display to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Read key sequences from stdin, one line at a time
    Repl,

    /// Manage the stack of math notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
}

#[derive(Subcommand)]
enum NotesAction {
    /// List all notes with their last result
    List,
    /// Add a note, optionally with an expression
    Add { input: Option<String> },
    /// Replace the expression of a note
    Set { id: u64, input: String },
    /// Evaluate one note
    Eval { id: u64 },
    /// Evaluate every note
    EvalAll,
    /// Delete a note
    Delete { id: u64 },
}

#[derive(Serialize)]
struct Snapshot<'a> {
    display: &'a str,
    mode: Mode,
    memory: Option<f64>,
    history: Vec<&'a HistoryEntry>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Keys {
            tokens,
            history,
            json,
            copy,
        } => run_keys(&config, &tokens.join(" "), history, json, copy),
        Command::Repl => run_repl(&config),
        Command::Notes { action } => run_notes(&config, action),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "retrocalc=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_keys(config: &Config, input: &str, history: bool, json: bool, copy: bool) -> Result<()> {
    let keys = parse_keys(input).context("Failed to read key sequence")?;
    let mut session = Session::new();
    session.press_all(keys);

    if json {
        let snapshot = Snapshot {
            display: session.display(),
            mode: session.state().mode(),
            memory: session.state().memory(),
            history: session.history().iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_display(config, &session));
        if history || config.show_history {
            print_history(&session);
        }
    }

    if copy {
        copy_to_clipboard(clipboard_text(session.display()))?;
    }

    Ok(())
}

fn run_repl(config: &Config) -> Result<()> {
    let mut session = Session::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{}", render_display(config, &session));
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":history" => print_history(&session),
            input => match parse_keys(input) {
                Ok(keys) => {
                    session.press_all(keys);
                    println!("{}", render_display(config, &session));
                }
                Err(err) => {
                    warn!(%err, "ignoring line");
                    eprintln!("{}", err);
                }
            },
        }
        stdout.flush()?;
    }

    Ok(())
}

fn run_notes(config: &Config, action: NotesAction) -> Result<()> {
    let path = config.notes_path()?;
    let store = JsonFileStore::new(&path);
    let mut book = NoteBook::open(store)
        .with_context(|| format!("Failed to open notes at {}", path.display()))?;

    match action {
        NotesAction::List => {
            for note in book.notes() {
                print_note(note);
            }
        }
        NotesAction::Add { input } => {
            let id = book.add()?;
            if let Some(input) = input {
                book.update_input(id, input)?;
            }
            println!("{}", id);
        }
        NotesAction::Set { id, input } => book.update_input(id, input)?,
        NotesAction::Eval { id } => print_note(book.evaluate(id)?),
        NotesAction::EvalAll => {
            book.evaluate_all()?;
            for note in book.notes() {
                print_note(note);
            }
        }
        NotesAction::Delete { id } => {
            book.delete(id)?;
        }
    }

    Ok(())
}

/// Display line with the memory indicator in front.
fn render_display(config: &Config, session: &Session) -> String {
    let indicator = if session.has_memory() { "M" } else { " " };
    let display = if config.group_digits {
        group_digits(session.display())
    } else {
        session.display().to_string()
    };
    format!("{} {}", indicator, display)
}

fn print_history(session: &Session) {
    for entry in session.history().iter() {
        println!(
            "  {}  {} = {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.expression,
            entry.result
        );
    }
}

fn print_note(note: &Note) {
    match note.result_text() {
        Some(result) => println!("{:>3}  {}  = {}", note.id, note.input, result),
        None => println!("{:>3}  {}", note.id, note.input),
    }
}
