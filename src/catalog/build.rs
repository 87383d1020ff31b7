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

//! Catalog creation and update.
//!
//! Both operations scan a search path for images in a year range and turn
//! them into records:
//!
//! * [`create_catalog`] writes a brand-new catalog file named after the
//!   segment, asking before it replaces an existing one.
//! * [`update_catalog`] merges into an existing catalog file, adding only
//!   images whose source is not already cataloged. Records already present
//!   are never modified.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::{
    catalog::{
        ignore::IgnoreList,
        read_catalog,
        scan::{self, ScannedImage},
        write_catalog,
    },
    device,
    error::CatalogResult,
    model::{Catalog, ImageRecord, YearRange},
};

/// Parameters shared by catalog creation and update.
#[derive(Debug, Clone)]
pub(crate) struct ScanRequest {
    pub(crate) search_path: PathBuf,
    pub(crate) range: YearRange,
    pub(crate) ignore: IgnoreList,
    pub(crate) device_id: Option<String>,
}

impl ScanRequest {
    /// Loads the ignore list and reads the device identifier for a run.
    ///
    /// An unreadable device file only means records get no device id.
    ///
    /// # Errors
    ///
    /// Returns an error if the ignore file exists but cannot be read.
    pub(crate) fn load(
        search_path: PathBuf,
        range: YearRange,
        ignore_file: Option<&Path>,
        device_file: &Path,
    ) -> CatalogResult<Self> {
        let ignore = IgnoreList::load(ignore_file)?;
        tracing::debug!(entries = ignore.len(), "ignore list loaded");

        Ok(Self {
            search_path,
            range,
            ignore,
            device_id: device::read_device_id(device_file),
        })
    }
}

/// Decides whether an existing catalog file may be replaced.
pub(crate) trait ConfirmReplace {
    fn confirm_replace(&self, path: &Path) -> bool;
}

impl<F> ConfirmReplace for F
where
    F: Fn(&Path) -> bool,
{
    fn confirm_replace(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Outcome of a create or update run.
#[derive(Debug, Clone)]
pub(crate) struct RunSummary {
    pub(crate) catalog_path: PathBuf,
    pub(crate) segment: String,
    pub(crate) found: usize,
    pub(crate) added: usize,
    pub(crate) total_bytes: u64,
}

impl RunSummary {
    pub(crate) fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }

    pub(crate) fn total_gb(&self) -> f64 {
        self.total_mb() / 1024.0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalog: {}", self.catalog_path.display())?;
        writeln!(f, "Segment: {}", self.segment)?;
        writeln!(f, "Total number of images: {}", self.found)?;
        writeln!(f, "Images added: {}", self.added)?;
        write!(
            f,
            "Total size: {} bytes, {:.2} MB, {:.2} GB",
            self.total_bytes,
            self.total_mb(),
            self.total_gb()
        )
    }
}

/// One record per scanned image with blank descriptive fields.
pub(crate) fn build_records(
    images: &[ScannedImage],
    device_id: Option<&str>,
    now: DateTime<Local>,
) -> Vec<ImageRecord> {
    images
        .iter()
        .map(|image| {
            ImageRecord::discovered(
                image.source.clone(),
                device_id.map(str::to_string),
                now,
                image.modified,
            )
        })
        .collect()
}

/// Scans and writes `<catalog_dir>/<segment>.json`.
///
/// When the file already exists `confirm` is asked first. Declining leaves
/// the file untouched and returns `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the scan fails or the file cannot be written.
pub(crate) fn create_catalog(
    catalog_dir: &Path,
    request: &ScanRequest,
    confirm: &dyn ConfirmReplace,
) -> CatalogResult<Option<RunSummary>> {
    let segment = request.range.segment_name();
    let catalog_path = catalog_file_path(catalog_dir, request.range);

    if catalog_path.exists() && !confirm.confirm_replace(&catalog_path) {
        tracing::info!(path = %catalog_path.display(), "existing catalog kept");
        return Ok(None);
    }

    let images = scan::find_images(&request.search_path, request.range, &request.ignore)?;
    let records = build_records(&images, request.device_id.as_deref(), Local::now());
    let added = records.len();

    write_catalog(&catalog_path, &Catalog::with_segment(segment.clone(), records))?;

    Ok(Some(RunSummary {
        catalog_path,
        segment,
        found: images.len(),
        added,
        total_bytes: total_bytes(&images),
    }))
}

/// The file [`create_catalog`] writes for `range` in `catalog_dir`.
pub(crate) fn catalog_file_path(catalog_dir: &Path, range: YearRange) -> PathBuf {
    catalog_dir.join(format!("{}.json", range.segment_name()))
}

/// Scans and merges new images into the catalog at `catalog_path`.
///
/// A catalog file that does not exist yet is treated as empty.
///
/// # Errors
///
/// Returns an error if the scan fails, the existing file is not a valid
/// catalog, or the file cannot be written.
pub(crate) fn update_catalog(catalog_path: &Path, request: &ScanRequest) -> CatalogResult<RunSummary> {
    let segment = request.range.segment_name();

    let mut catalog = if catalog_path.exists() {
        read_catalog(catalog_path)?
    } else {
        Catalog::new()
    };

    let images = scan::find_images(&request.search_path, request.range, &request.ignore)?;
    let records = build_records(&images, request.device_id.as_deref(), Local::now());
    let added = catalog.merge(&segment, records, &request.ignore);

    write_catalog(catalog_path, &catalog)?;

    tracing::info!(path = %catalog_path.display(), found = images.len(), added, "catalog updated");

    Ok(RunSummary {
        catalog_path: catalog_path.to_path_buf(),
        segment,
        found: images.len(),
        added,
        total_bytes: total_bytes(&images),
    })
}

fn total_bytes(images: &[ScannedImage]) -> u64 {
    images.iter().map(|i| i.size).sum()
}
