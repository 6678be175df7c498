//! `recast` — practise rewriting sentences from an imported corpus.
//!
//! # Usage
//!
//! ```text
//! recast import sentences.csv
//! recast                      # interactive practice form
//! recast export rewrites.csv
//! recast status --json
//! recast --db ~/notes/recast.db --config recast.toml reset --yes
//! ```

mod actions;
mod app;
mod commands;
mod settings;
#[cfg(test)]
mod testing;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use recast_core::session::Session;
use recast_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "recast", version, about = "Sentence rewriting practice")]
struct Cli {
  /// Path to a TOML config file (store_path, seed, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database file; overrides the config file.
  #[arg(long, value_name = "PATH")]
  db: Option<PathBuf>,

  /// Seed for sentence selection, for reproducible sessions.
  #[arg(long)]
  seed: Option<u64>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the interactive practice form (the default).
  Practice,
  /// Import sentences from a CSV file with a `sentence` column.
  Import { file: PathBuf },
  /// Write `original,rewrite` rows for every sentence to a CSV file.
  Export {
    file: PathBuf,
    /// Only rows with a non-empty rewrite.
    #[arg(long)]
    rewritten_only: bool,
  },
  /// Mark every sentence unseen and clear all rewrites.
  Reset {
    /// Skip the confirmation question.
    #[arg(short, long)]
    yes: bool,
  },
  /// Show progress counters.
  Status {
    #[arg(long)]
    json: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut settings = Settings::load(cli.config.as_deref())?;
  // CLI flags override config file and environment.
  if let Some(db) = cli.db {
    settings.store_path = settings::expand_tilde(&db);
  }
  if cli.seed.is_some() {
    settings.seed = cli.seed;
  }

  let command = cli.command.unwrap_or(Command::Practice);

  // The form owns the terminal, so it logs to a file instead of stderr.
  if matches!(command, Command::Practice) {
    init_file_tracing(&settings.log_path())?;
  } else {
    init_stderr_tracing();
  }

  let mut store = SqliteStore::open(&settings.store_path)
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  if let Some(seed) = settings.seed {
    store = store.with_seed(seed);
  }
  let mut session = Session::new(store);

  match command {
    Command::Practice => run_practice(session),
    Command::Import { file } => commands::import(&mut session, &file),
    Command::Export { file, rewritten_only } => {
      commands::export(&session, &file, rewritten_only)
    }
    Command::Reset { yes } => commands::reset(&mut session, yes),
    Command::Status { json } => commands::status(&session, json),
  }
}

fn env_filter() -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy()
}

fn init_stderr_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter())
    .with_writer(io::stderr)
    .init();
}

fn init_file_tracing(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating log directory {}", parent.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(env_filter())
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Practice form ────────────────────────────────────────────────────────────

fn run_practice(session: Session<SqliteStore>) -> Result<()> {
  let mut app = App::new(session);
  app.start();

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<SqliteStore>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250))? {
      continue;
    }

    match event::read()? {
      // Some terminals report releases too; act on presses only.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
