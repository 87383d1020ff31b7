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


//! Application event handling.
//!
//! Every input to the viewer arrives as an [`AppEvent`] on one channel: key
//! presses from the input thread, ticks from the tick thread, commands from
//! the command line and results from the task worker. The event loop applies
//! each event to the [`App`] state on the main thread and redraws.

mod handlers;
mod keys;

use handlers::*;

use std::{io::Stdout, path::PathBuf};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, MainView, catalog::build::RunSummary, commander::Command, render::draw};

pub(crate) const MISSING_IMAGE_NOTICE: &str = "The image file does not exist.";

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,
    ExitApplication,

    Command(Command),
    SetMainView(MainView),

    CatalogCreated(RunSummary),
    CatalogCreateDeclined(PathBuf),
    CatalogMerged(RunSummary),
    StatsWritten { output: PathBuf, groups: usize },
    /// `catalog_path` is the file the failed task was to write.
    TaskFailed { catalog_path: Option<PathBuf>, message: String },

    Error(String),
}

/// A dismissible message shown over the current view.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Notice {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

impl Notice {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        apply_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

fn apply_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => keys::process_key_event(app, key)?,
        AppEvent::Command(command) => handle_command(app, command)?,
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::CatalogCreated(summary) => handle_catalog_created(app, summary),
        AppEvent::CatalogCreateDeclined(path) => handle_catalog_create_declined(app, path),
        AppEvent::CatalogMerged(summary) => handle_catalog_merged(app, summary),
        AppEvent::StatsWritten { output, groups } => handle_stats_written(app, output, groups),
        AppEvent::TaskFailed { catalog_path, message } => handle_task_failed(app, catalog_path, message),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick | AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CatalogSession, scan::tests::{MID_2021, touch}, write_catalog},
        config::AppConfig,
        model::{Catalog, ImageRecord, YearRange},
        tasks::AppTask,
    };
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::{fs, path::Path, sync::mpsc::{self, Receiver}};
    use tempfile::TempDir;

    const SEGMENT: &str = "detail_2021";

    fn record(source: &Path) -> ImageRecord {
        ImageRecord {
            source: source.to_string_lossy().replace('\\', "/"),
            date_modified: "2021-06-01 00:00:00".into(),
            category: "Personal".into(),
            ..ImageRecord::default()
        }
    }

    fn test_app(dir: &TempDir, records: Vec<ImageRecord>) -> (App, Receiver<AppTask>) {
        let path = dir.path().join("detail_2021.json");
        write_catalog(&path, &Catalog::with_segment(SEGMENT.into(), records)).unwrap();

        let config = AppConfig {
            trash_dir: Some(dir.path().join("trash")),
            ..AppConfig::default()
        };
        let (task_tx, task_rx) = mpsc::channel();
        let app = App::new(config, CatalogSession::open(path).unwrap(), task_tx);
        (app, task_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        apply_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn ctrl(app: &mut App, c: char) {
        apply_event(app, AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))).unwrap();
    }

    #[test]
    fn missing_image_shows_notice_and_keeps_record() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tasks) = test_app(&dir, vec![record(&dir.path().join("gone.jpg"))]);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);

        assert!(app.editor.is_none());
        assert_eq!(app.notice, Some(Notice::info(MISSING_IMAGE_NOTICE)));
        assert_eq!(app.session.records(SEGMENT).len(), 1);

        press(&mut app, KeyCode::Enter);
        assert!(app.notice.is_none());
    }

    #[test]
    fn editing_and_saving_updates_the_file() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pics/a.jpg");
        touch(&image, MID_2021);
        let (mut app, _tasks) = test_app(&dir, vec![record(&image)]);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_some());

        for c in "Ann".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        ctrl(&mut app, 's');

        assert!(app.editor.is_none());
        assert_eq!(app.notice, Some(Notice::info("Image data updated")));

        let reopened = CatalogSession::open(app.session.path()).unwrap();
        let saved = &reopened.records(SEGMENT)[0];
        assert_eq!(saved.artist, "Ann");
        assert!(saved.timestamp.is_some());
    }

    #[test]
    fn trashing_moves_file_and_drops_record() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pics/a.jpg");
        touch(&image, MID_2021);
        let (mut app, _tasks) = test_app(&dir, vec![record(&image)]);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 't');

        assert_eq!(app.notice, Some(Notice::info("Moved to Trash")));
        assert!(!image.exists());
        assert!(dir.path().join("trash/a.jpg").exists());
        assert!(app.session.records(SEGMENT).is_empty());
        assert!(app.browser.records.is_empty());
    }

    #[test]
    fn edits_are_refused_while_updating_open_catalog() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pics/a.jpg");
        touch(&image, MID_2021);
        let (mut app, tasks) = test_app(&dir, vec![record(&image)]);

        apply_event(
            &mut app,
            AppEvent::Command(Command::UpdateCatalog {
                search_path: Some(dir.path().join("pics")),
                ignore_file: None,
            }),
        )
        .unwrap();
        assert!(matches!(tasks.try_recv(), Ok(AppTask::UpdateCatalog { .. })));

        app.notice = None;
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);

        assert!(app.editor.is_none());
        assert!(app.notice.is_some());

        let failed = AppEvent::TaskFailed {
            catalog_path: Some(app.session.path().to_path_buf()),
            message: "boom".into(),
        };
        apply_event(&mut app, failed).unwrap();
        app.notice = None;
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_some());
    }

    #[test]
    fn unrelated_failure_keeps_edits_refused() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pics/a.jpg");
        touch(&image, MID_2021);
        let (mut app, tasks) = test_app(&dir, vec![record(&image)]);

        apply_event(
            &mut app,
            AppEvent::Command(Command::ImageStats {
                dir: Some(dir.path().join("pics")),
                output: Some(dir.path().join("report.txt")),
            }),
        )
        .unwrap();
        apply_event(
            &mut app,
            AppEvent::Command(Command::UpdateCatalog {
                search_path: Some(dir.path().join("pics")),
                ignore_file: None,
            }),
        )
        .unwrap();
        assert!(matches!(tasks.try_recv(), Ok(AppTask::ImageStats { .. })));
        assert!(matches!(tasks.try_recv(), Ok(AppTask::UpdateCatalog { .. })));

        let failed = AppEvent::TaskFailed {
            catalog_path: None,
            message: "Failed to write image statistics".into(),
        };
        apply_event(&mut app, failed).unwrap();
        assert!(app.is_open_catalog_pending());

        app.notice = None;
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_none());
        assert!(app.notice.as_ref().is_some_and(|n| n.is_error));
    }

    #[test]
    fn replacing_open_catalog_refuses_edits_then_reloads() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pics/a.jpg");
        touch(&image, MID_2021);
        let (mut app, tasks) = test_app(&dir, vec![record(&image)]);

        apply_event(
            &mut app,
            AppEvent::Command(Command::NewCatalog {
                range: YearRange::new(2021, Some(2021)).unwrap(),
                catalog_dir: dir.path().to_path_buf(),
                search_path: dir.path().join("pics"),
                ignore_file: None,
                replace: true,
            }),
        )
        .unwrap();
        let Ok(task) = tasks.try_recv() else {
            panic!("expected a create task");
        };
        assert_eq!(task.catalog_path().as_deref(), Some(app.session.path()));

        app.notice = None;
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_none());

        let other = dir.path().join("pics/b.jpg");
        touch(&other, MID_2021);
        write_catalog(
            app.session.path(),
            &Catalog::with_segment(SEGMENT.into(), vec![record(&image), record(&other)]),
        )
        .unwrap();
        let summary = RunSummary {
            catalog_path: app.session.path().to_path_buf(),
            segment: SEGMENT.into(),
            found: 2,
            added: 2,
            total_bytes: 0,
        };
        apply_event(&mut app, AppEvent::CatalogCreated(summary)).unwrap();

        assert!(!app.is_open_catalog_pending());
        assert_eq!(app.session.records(SEGMENT).len(), 2);
        assert_eq!(app.browser.records.len(), 2);

        app.notice = None;
        press(&mut app, KeyCode::Enter);
        assert!(app.editor.is_some());
    }

    #[test]
    fn merged_update_reloads_open_catalog() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tasks) = test_app(&dir, vec![]);

        let extra = record(&dir.path().join("pics/b.jpg"));
        write_catalog(app.session.path(), &Catalog::with_segment(SEGMENT.into(), vec![extra])).unwrap();

        let summary = RunSummary {
            catalog_path: app.session.path().to_path_buf(),
            segment: SEGMENT.into(),
            found: 1,
            added: 1,
            total_bytes: 0,
        };
        apply_event(&mut app, AppEvent::CatalogMerged(summary)).unwrap();

        assert_eq!(app.browser.records.len(), 1);
        assert_eq!(app.deck_view.deck.items.len(), 1);
    }

    #[test]
    fn deck_key_switches_view() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tasks) = test_app(&dir, vec![]);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.main_view, MainView::Deck);

        apply_event(&mut app, AppEvent::Command(Command::ShowBrowser)).unwrap();
        assert_eq!(app.main_view, MainView::Browse);
    }

    #[test]
    fn command_errors_become_notices() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tasks) = test_app(&dir, vec![]);

        apply_event(&mut app, AppEvent::Command(Command::Open(dir.path().join("none.json")))).unwrap();

        assert!(app.notice.as_ref().is_some_and(|n| n.is_error));
        assert!(fs::metadata(app.session.path()).is_ok());
    }
}
