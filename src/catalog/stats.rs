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

//! Image statistics report.
//!
//! Counts the images under a directory grouped by creation year and file
//! type, and writes the totals as a tab-delimited file, largest groups first.

use std::{collections::BTreeMap, fmt::Write as _, fs, path::Path, time::SystemTime};

use chrono::{DateTime, Datelike, Local};
use walkdir::WalkDir;

use crate::error::{CatalogError, CatalogResult};

pub(crate) const DEFAULT_REPORT_FILE: &str = "file_analysis.txt";

const STATS_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

const HEADER: &str = "Directory_Path\tProcessed_Date\tImage_Year\tType\tCount\tSize (MB)";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatsRow {
    pub(crate) year: i32,
    /// Upper-cased extension with its dot, e.g. `.JPG`.
    pub(crate) kind: String,
    pub(crate) count: usize,
    pub(crate) size_mb: f64,
}

/// Groups the images under `dir` by (year, type), largest total size first.
pub(crate) fn collect_stats(dir: &Path) -> Vec<StatsRow> {
    let mut groups: BTreeMap<(i32, String), (usize, u64)> = BTreeMap::new();

    for entry in WalkDir::new(dir).into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if !STATS_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), "Skipping file: {}", e);
                continue;
            }
        };

        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let year = DateTime::<Local>::from(created).year();

        let group = groups.entry((year, format!(".{}", ext.to_ascii_uppercase()))).or_default();
        group.0 += 1;
        group.1 += metadata.len();
    }

    let mut rows: Vec<StatsRow> = groups
        .into_iter()
        .map(|((year, kind), (count, bytes))| StatsRow {
            year,
            kind,
            count,
            size_mb: bytes as f64 / (1024.0 * 1024.0),
        })
        .collect();

    rows.sort_by(|a, b| b.size_mb.total_cmp(&a.size_mb));
    rows
}

/// Collects statistics for `dir` and writes them to `output`.
pub(crate) fn write_report(
    dir: &Path,
    output: &Path,
    processed: DateTime<Local>,
) -> CatalogResult<Vec<StatsRow>> {
    let rows = collect_stats(dir);
    let text = render_report(dir, &rows, processed);

    fs::write(output, text).map_err(|e| CatalogError::io(output, e))?;

    tracing::info!(output = %output.display(), groups = rows.len(), "image statistics written");
    Ok(rows)
}

fn render_report(dir: &Path, rows: &[StatsRow], processed: DateTime<Local>) -> String {
    let processed = processed.format("%m/%d/%Y %H:%M").to_string();
    let dir = dir.display();

    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");
    for row in rows {
        let size = (row.size_mb * 100.0).round() / 100.0;
        let _ = writeln!(
            out,
            "{dir}\t{processed}\t{}\t{}\t{}\t{size}",
            row.year, row.kind, row.count
        );
    }
    out
}
