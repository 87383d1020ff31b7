// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! # Artwork Image Catalog.
//!
//! Catalogs image files by the year they were last modified and lets the
//! descriptive details of each image be edited in a terminal UI.
//!
//! The command line offers:
//!
//! * `new` and `update` to scan a directory tree and create or extend a
//!   catalog file for a year range,
//! * `view` to browse and edit a catalog in the terminal,
//! * `device-id` to create the identity file naming this workstation,
//! * `stats` to write a per-year, per-type report of the images in a tree.
//!
//! ## Architecture
//!
//! The viewer uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, all catalog
//!   mutation, and UI rendering.
//! * A **Background Worker** runs scans and reports via [`tasks::AppTask`]s.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! Communication between the UI and the worker is handled via
//! `std::sync::mpsc` channels.

mod browser;
mod catalog;
mod commander;
mod components;
mod config;
mod device;
mod error;
mod events;
mod model;
mod render;
mod tasks;
mod theme;

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

use crate::{
    browser::CatalogBrowser,
    catalog::{
        CatalogSession,
        build::{self, ScanRequest},
        stats,
        trash::TrashBin,
    },
    commander::Commander,
    components::{DeckView, RecordEditor},
    config::AppConfig,
    error::CatalogError,
    events::{AppEvent, Notice, process_events},
    model::YearRange,
    tasks::AppTask,
    theme::Theme,
};

#[derive(Parser)]
#[command(version, about = "Catalog artwork images by year and edit their details")]
struct Opts {
    /// Increase verbosity (-v, -vv). Default WARN.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Decrease verbosity (-q, -qq).
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Browse and edit a catalog file in the terminal
    View {
        /// Catalog file to open
        catalog: PathBuf,
    },

    /// Scan a directory tree and write a new catalog for a year range
    New {
        /// Directory the catalog file is written to
        #[arg(long)]
        catalog_path: PathBuf,
        /// Directory tree to scan for images
        #[arg(long)]
        search_path: PathBuf,
        #[arg(long)]
        start_year: i32,
        #[arg(long)]
        end_year: Option<i32>,
        /// File listing paths to leave out, one per line
        #[arg(long)]
        ignore_file: Option<PathBuf>,
        /// Replace an existing catalog without asking
        #[arg(long)]
        force: bool,
    },

    /// Scan a directory tree and add new images to an existing catalog
    Update {
        /// Catalog file to extend
        #[arg(long)]
        catalog_file_path: PathBuf,
        /// Directory tree to scan for images
        #[arg(long)]
        search_path: PathBuf,
        /// Defaults to the range in the catalog file name
        #[arg(long)]
        start_year: Option<i32>,
        #[arg(long)]
        end_year: Option<i32>,
        /// File listing paths to leave out, one per line
        #[arg(long)]
        ignore_file: Option<PathBuf>,
    },

    /// Create the identity file naming this workstation
    DeviceId {
        /// Defaults to the configured device file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace an existing identity file with a new identifier
        #[arg(long)]
        force: bool,
    },

    /// Write image counts and sizes per year and type
    Stats {
        /// Defaults to the home directory
        #[arg(long)]
        directory: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Browse,
    Deck,
}

/// Application state.
pub(crate) struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub session: CatalogSession,
    pub trash_bin: TrashBin,
    /// Catalog files that queued or running tasks will write, one entry per
    /// task.
    pub pending_writes: Vec<PathBuf>,

    pub browser: CatalogBrowser,
    pub deck_view: DeckView,
    pub editor: Option<RecordEditor>,
    pub notice: Option<Notice>,
    pub commander: Commander,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, session: CatalogSession, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let mut browser = CatalogBrowser::new();
        browser.refresh(&session);

        let mut deck_view = DeckView::new();
        deck_view.refresh(&session);

        Self {
            trash_bin: TrashBin::from_config(config.trash_dir.as_deref()),
            config,
            theme: Theme::default(),
            main_view: MainView::Browse,
            event_tx,
            event_rx,
            task_tx,
            session,
            pending_writes: Vec::new(),
            browser,
            deck_view,
            editor: None,
            notice: None,
            commander: Commander::new(),
        }
    }

    /// Whether a background task is still to write the open catalog.
    pub fn is_open_catalog_pending(&self) -> bool {
        self.pending_writes.iter().any(|p| p == self.session.path())
    }
}

fn main() {
    let opts = Opts::parse();
    let verbosity = i16::from(opts.verbose) - i16::from(opts.quiet);

    if let Err(e) = run_command(opts.command, verbosity) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run_command(command: CliCommand, verbosity: i16) -> Result<()> {
    let config = config::load_config();

    if !matches!(command, CliCommand::View { .. }) {
        init_tracing(verbosity, io::stderr);
    }

    match command {
        CliCommand::View { catalog } => run_viewer(config, catalog, verbosity),

        CliCommand::New {
            catalog_path,
            search_path,
            start_year,
            end_year,
            ignore_file,
            force,
        } => {
            let range = YearRange::new(start_year, end_year)?;
            let request =
                ScanRequest::load(search_path, range, ignore_file.as_deref(), &config.device_file)?;

            let confirm = |path: &Path| force || confirm_on_terminal(path);
            match build::create_catalog(&catalog_path, &request, &confirm)? {
                Some(summary) => println!("{summary}"),
                None => println!("Existing catalog kept."),
            }
            Ok(())
        }

        CliCommand::Update {
            catalog_file_path,
            search_path,
            start_year,
            end_year,
            ignore_file,
        } => {
            let range = match (start_year, end_year) {
                (None, None) => YearRange::from_catalog_path(&catalog_file_path)?,
                (Some(start), end) => YearRange::new(start, end)?,
                (None, Some(_)) => bail!("A start year is required when an end year is given"),
            };
            let request =
                ScanRequest::load(search_path, range, ignore_file.as_deref(), &config.device_file)?;

            let summary = build::update_catalog(&catalog_file_path, &request)?;
            println!("{summary}");
            Ok(())
        }

        CliCommand::DeviceId { output, force } => {
            let path = output.unwrap_or_else(|| config.device_file.clone());
            let identity = match device::create_identity_file(&path, force) {
                Err(CatalogError::AlreadyExists(path)) => {
                    bail!("{} already exists, use --force to replace it", path.display())
                }
                result => result?,
            };
            println!("Device id {} written to {}", identity.device_id, path.display());
            Ok(())
        }

        CliCommand::Stats { directory, output } => {
            let dir = directory
                .or_else(dirs::home_dir)
                .context("No directory given and no home directory found")?;
            let output = output.unwrap_or_else(|| PathBuf::from(stats::DEFAULT_REPORT_FILE));

            let rows = stats::write_report(&dir, &output, Local::now())?;
            println!("Wrote {} groups to {}", rows.len(), output.display());
            Ok(())
        }
    }
}

/// Asks on the terminal whether `path` may be replaced, defaulting to no.
fn confirm_on_terminal(path: &Path) -> bool {
    print!("{} already exists. Replace it? [y/N] ", path.display());
    io::stdout().flush().ok();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Map -q/-v to tracing levels; default WARN.
fn init_tracing<W>(verbosity: i16, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level = match verbosity {
        i16::MIN..=-2 => LevelFilter::OFF,
        -1 => LevelFilter::ERROR,
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Opens the catalog and runs the viewer until the user quits.
///
/// The catalog is opened before the terminal is taken over, so a bad file is
/// reported like any other command line error.
fn run_viewer(config: AppConfig, catalog: PathBuf, verbosity: i16) -> Result<()> {
    let log_path = config.log_path();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir).ok();
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    init_tracing(verbosity.max(1), Mutex::new(log_file));

    let session = CatalogSession::open(&catalog)?;

    let (task_tx, task_rx) = mpsc::channel();
    let mut app = App::new(config, session, task_tx);

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Best-effort: called during cleanup, so failures are ignored.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s.
/// * An input thread to poll for keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    // Translate raw key presses to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
            }
        }
    });

    // Periodic tick, the minimum redraw rate of the TUI.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    process_events(terminal, app)
}
