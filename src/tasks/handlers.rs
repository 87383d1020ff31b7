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

use anyhow::{Context, Result};
use chrono::Local;

use crate::{
    catalog::{
        build::{self, ScanRequest},
        stats,
    },
    events::AppEvent,
    model::YearRange,
    tasks::TaskContext,
};

pub(super) fn create_catalog(
    ctx: &TaskContext,
    catalog_dir: PathBuf,
    search_path: PathBuf,
    range: YearRange,
    ignore_file: Option<PathBuf>,
    replace: bool,
) -> Result<()> {
    let request = ScanRequest::load(search_path, range, ignore_file.as_deref(), &ctx.config.device_file)
        .context("Failed to read ignore file")?;

    let outcome = build::create_catalog(&catalog_dir, &request, &|_: &Path| replace)
        .context("Failed to create catalog")?;

    match outcome {
        Some(summary) => ctx.event_tx.send(AppEvent::CatalogCreated(summary))?,
        None => {
            let path = build::catalog_file_path(&catalog_dir, range);
            ctx.event_tx.send(AppEvent::CatalogCreateDeclined(path))?;
        }
    }

    Ok(())
}

pub(super) fn update_catalog(
    ctx: &TaskContext,
    catalog_path: PathBuf,
    search_path: PathBuf,
    range: YearRange,
    ignore_file: Option<PathBuf>,
) -> Result<()> {
    let request = ScanRequest::load(search_path, range, ignore_file.as_deref(), &ctx.config.device_file)
        .context("Failed to read ignore file")?;

    let summary = build::update_catalog(&catalog_path, &request).context("Failed to update catalog")?;
    ctx.event_tx.send(AppEvent::CatalogMerged(summary))?;

    Ok(())
}

pub(super) fn image_stats(ctx: &TaskContext, dir: PathBuf, output: PathBuf) -> Result<()> {
    let rows = stats::write_report(&dir, &output, Local::now()).context("Failed to write image statistics")?;
    ctx.event_tx.send(AppEvent::StatsWritten {
        output,
        groups: rows.len(),
    })?;

    Ok(())
}
