// primer: step-through lessons with state visualization

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use primer::config::{Config, DEFAULT_SNAPSHOT_LIMIT};
use primer::lessons::{self, Lesson};
use primer::session::Session;
use primer::ui::App;

/// Step-through lessons on values, references, slices, maps and traits.
#[derive(Parser)]
#[command(name = "primer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Seed for lessons that draw random numbers (random when omitted).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Snapshot history budget in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    snapshot_limit: usize,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available lessons.
    List,

    /// Run a lesson and print its output.
    Run {
        /// Lesson to run.
        #[arg(value_enum)]
        lesson: Lesson,

        /// Arguments handed to the lesson.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a lesson, then step through its history in the terminal viewer.
    View {
        /// Lesson to run.
        #[arg(value_enum)]
        lesson: Lesson,

        /// Arguments handed to the lesson.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config {
        seed: cli.seed,
        snapshot_limit: cli.snapshot_limit,
    };

    match cli.command {
        Commands::List => {
            for lesson in Lesson::all() {
                println!("{:<12} {}", lesson.name(), lesson.summary());
            }
            Ok(())
        }
        Commands::Run { lesson, args } => run_lesson(lesson, &args, &config),
        Commands::View { lesson, args } => view_lesson(lesson, &args, &config),
    }
}

/// Write the recorded output to the real streams
fn flush_transcript(session: &Session) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(session.terminal().stdout_text().as_bytes())?;
    stdout.flush()?;

    let mut stderr = io::stderr().lock();
    stderr.write_all(session.terminal().stderr_text().as_bytes())?;
    stderr.flush()?;
    Ok(())
}

fn run_lesson(lesson: Lesson, args: &[String], config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    let result = lessons::run(lesson, &mut session, args);
    flush_transcript(&session)?;

    match result {
        Ok(()) => Ok(()),
        // Wrong argument count: exit 1 without a message
        Err(e) if e.is_silent() => process::exit(1),
        Err(e) => Err(e).with_context(|| format!("lesson '{}' failed", lesson)),
    }
}

fn view_lesson(lesson: Lesson, args: &[String], config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    match lessons::run(lesson, &mut session, args) {
        Ok(()) => {}
        Err(e) if e.is_silent() => {
            flush_transcript(&session)?;
            process::exit(1);
        }
        Err(e) if session.total_snapshots() > 0 => {
            warn!(error = %e, "lesson stopped early, viewing partial history");
        }
        Err(e) => return Err(e).with_context(|| format!("lesson '{}' failed", lesson)),
    }

    session
        .rewind_to_start()
        .context("lesson recorded no steps")?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, lesson);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}
