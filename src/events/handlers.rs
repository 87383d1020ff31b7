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


use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    App, MainView,
    catalog::{
        CatalogSession,
        build::{self, RunSummary},
        stats::DEFAULT_REPORT_FILE,
    },
    commander::Command,
    components::{EditOutcome, RecordEditor},
    error::CatalogError,
    events::{AppEvent, MISSING_IMAGE_NOTICE, Notice},
    model::YearRange,
    tasks::AppTask,
};

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
        Command::Open(path) => open_catalog(app, path),
        Command::Refresh => reload_session(app),
        Command::SortByDate => {
            app.session.sort_by_date();
            refresh_views(app);
        }
        Command::ShowDeck => handle_set_main_view(app, MainView::Deck),
        Command::ShowBrowser => handle_set_main_view(app, MainView::Browse),

        Command::NewCatalog {
            range,
            catalog_dir,
            search_path,
            ignore_file,
            replace,
        } => {
            let catalog_path = build::catalog_file_path(&catalog_dir, range);
            app.task_tx.send(AppTask::CreateCatalog {
                catalog_dir,
                search_path,
                range,
                ignore_file: ignore_file.or_else(|| app.config.ignore_file.clone()),
                replace,
            })?;
            app.pending_writes.push(catalog_path);
            app.notice = Some(Notice::info(format!("Creating catalog {}...", range.segment_name())));
        }

        Command::UpdateCatalog {
            search_path,
            ignore_file,
        } => update_open_catalog(app, search_path, ignore_file)?,

        Command::ImageStats { dir, output } => {
            let dir = dir
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));
            app.task_tx.send(AppTask::ImageStats { dir, output })?;
            app.notice = Some(Notice::info("Collecting image statistics..."));
        }
    }

    Ok(())
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    if main_view == MainView::Deck {
        app.deck_view.refresh(&app.session);
    }
    app.main_view = main_view;
}

pub(super) fn handle_catalog_created(app: &mut App, summary: RunSummary) {
    finish_write(app, &summary.catalog_path);

    app.notice = Some(Notice::info(format!(
        "Created {} with {} images",
        summary.catalog_path.display(),
        summary.added
    )));
}

pub(super) fn handle_catalog_create_declined(app: &mut App, path: PathBuf) {
    release_write(app, &path);

    app.notice = Some(Notice::error(format!(
        "{} already exists, use :new! to replace it",
        path.display()
    )));
}

pub(super) fn handle_catalog_merged(app: &mut App, summary: RunSummary) {
    finish_write(app, &summary.catalog_path);

    app.notice = Some(Notice::info(format!(
        "Added {} of {} images to {}",
        summary.added, summary.found, summary.segment
    )));
}

pub(super) fn handle_stats_written(app: &mut App, output: PathBuf, groups: usize) {
    app.notice = Some(Notice::info(format!(
        "Wrote {groups} groups to {}",
        output.display()
    )));
}

pub(super) fn handle_task_failed(app: &mut App, catalog_path: Option<PathBuf>, message: String) {
    if let Some(path) = catalog_path {
        release_write(app, &path);
    }
    app.notice = Some(Notice::error(message));
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.notice = Some(Notice::error(message));
}

/// Opens the editor for a record, unless the open catalog is being updated
/// or the image is gone.
pub(super) fn open_editor(app: &mut App, segment: String, source: String) {
    if app.is_open_catalog_pending() {
        app.notice = Some(Notice::error("Catalog update in progress, editing is disabled"));
        return;
    }

    match app.session.editable_record(&segment, &source) {
        Ok(record) => app.editor = Some(RecordEditor::new(segment, record.clone())),
        Err(CatalogError::MissingImage(path)) => {
            tracing::warn!(path = %path.display(), "image missing");
            app.notice = Some(Notice::info(MISSING_IMAGE_NOTICE));
        }
        Err(e) => app.notice = Some(Notice::error(e.to_string())),
    }
}

pub(super) fn handle_edit_outcome(app: &mut App, outcome: EditOutcome) {
    let result = match outcome {
        EditOutcome::Cancelled => return,
        EditOutcome::Saved { segment, record } => app
            .session
            .update_record(&segment, record)
            .map(|_| "Image data updated"),
        EditOutcome::Trashed { segment, record } => app
            .session
            .trash_record(&segment, &record.source, &app.trash_bin)
            .map(|_| "Moved to Trash"),
    };

    app.notice = Some(match result {
        Ok(message) => Notice::info(message),
        Err(e) => Notice::error(e.to_string()),
    });

    refresh_views(app);
}

fn open_catalog(app: &mut App, path: PathBuf) {
    match CatalogSession::open(&path) {
        Ok(session) => {
            app.session = session;
            app.browser = Default::default();
            refresh_views(app);
        }
        Err(e) => app.notice = Some(Notice::error(e.to_string())),
    }
}

fn reload_session(app: &mut App) {
    if let Err(e) = app.session.reload() {
        app.notice = Some(Notice::error(e.to_string()));
    }
    refresh_views(app);
}

/// Drops one pending write of `path`. Other tasks writing the same file keep
/// the guard.
fn release_write(app: &mut App, path: &Path) {
    if let Some(idx) = app.pending_writes.iter().position(|p| p == path) {
        app.pending_writes.remove(idx);
    }
}

/// A task has rewritten `path`. The open catalog is reloaded from disk.
fn finish_write(app: &mut App, path: &Path) {
    release_write(app, path);
    if path == app.session.path() {
        reload_session(app);
    }
}

fn refresh_views(app: &mut App) {
    app.browser.refresh(&app.session);
    app.deck_view.refresh(&app.session);
}

fn update_open_catalog(
    app: &mut App,
    search_path: Option<PathBuf>,
    ignore_file: Option<PathBuf>,
) -> Result<()> {
    let catalog_path = app.session.path().to_path_buf();

    let range = match YearRange::from_catalog_path(&catalog_path) {
        Ok(range) => range,
        Err(e) => {
            app.notice = Some(Notice::error(e.to_string()));
            return Ok(());
        }
    };

    app.task_tx.send(AppTask::UpdateCatalog {
        catalog_path: catalog_path.clone(),
        search_path: search_path.unwrap_or_else(|| app.config.search_path()),
        range,
        ignore_file: ignore_file.or_else(|| app.config.ignore_file.clone()),
    })?;

    app.notice = Some(Notice::info(format!("Updating {}...", range.segment_name())));
    app.pending_writes.push(catalog_path);

    Ok(())
}
