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


//! Background application task processing.
//!
//! Catalog creation, catalog updates and statistics reports walk whole
//! directory trees, so they run on a dedicated worker thread instead of the
//! UI thread. The worker translates [`AppTask`] requests into calls on the
//! catalog core and reports the results back to the application as
//! [`AppEvent`]s.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;

use crate::{catalog::build, config::AppConfig, events::AppEvent, model::YearRange};

#[derive(Debug)]
pub(crate) enum AppTask {
    CreateCatalog {
        catalog_dir: PathBuf,
        search_path: PathBuf,
        range: YearRange,
        ignore_file: Option<PathBuf>,
        replace: bool,
    },

    UpdateCatalog {
        catalog_path: PathBuf,
        search_path: PathBuf,
        range: YearRange,
        ignore_file: Option<PathBuf>,
    },

    ImageStats {
        dir: PathBuf,
        output: PathBuf,
    },
}

impl AppTask {
    /// The catalog file this task writes, if any.
    pub(crate) fn catalog_path(&self) -> Option<PathBuf> {
        match self {
            AppTask::CreateCatalog { catalog_dir, range, .. } => Some(build::catalog_file_path(catalog_dir, *range)),
            AppTask::UpdateCatalog { catalog_path, .. } => Some(catalog_path.clone()),
            AppTask::ImageStats { .. } => None,
        }
    }
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(config: &AppConfig, task_rx: Receiver<AppTask>, event_tx: Sender<AppEvent>) {
    let config = config.clone();

    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let ctx = TaskContext {
                config: &config,
                event_tx: &event_tx,
            };

            let catalog_path = task.catalog_path();
            if let Err(e) = handle_task(task, &ctx) {
                tracing::error!("task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::TaskFailed {
                    catalog_path,
                    message: format!("{:#}", e),
                });
            }
        }
    });
}

/// Bundles shared resources required by task handlers.
pub(crate) struct TaskContext<'a> {
    config: &'a AppConfig,
    event_tx: &'a Sender<AppEvent>,
}

fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::CreateCatalog {
            catalog_dir,
            search_path,
            range,
            ignore_file,
            replace,
        } => handlers::create_catalog(ctx, catalog_dir, search_path, range, ignore_file, replace),

        AppTask::UpdateCatalog {
            catalog_path,
            search_path,
            range,
            ignore_file,
        } => handlers::update_catalog(ctx, catalog_path, search_path, range, ignore_file),

        AppTask::ImageStats { dir, output } => handlers::image_stats(ctx, dir, output),
    }
}
