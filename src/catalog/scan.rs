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

//! Image discovery on the local filesystem.
//!
//! This module walks a directory tree with `WalkDir` and selects image files
//! by extension and by the year of their last modification, skipping any
//! path covered by the ignore list.
//!
//! # Errors
//!
//! Directories that cannot be read are logged and skipped. Failing to read
//! the metadata of a matching image aborts the scan.

use std::path::Path;

use chrono::{DateTime, Datelike, Local};
use walkdir::{DirEntry, WalkDir};

use crate::{
    catalog::ignore::IgnoreList,
    error::{CatalogError, CatalogResult},
    model::YearRange,
};

/// File extensions treated as images, compared case-insensitively.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// An image found by [`find_images`].
#[derive(Debug, Clone)]
pub(crate) struct ScannedImage {
    /// Path with `/` separators.
    pub(crate) source: String,
    pub(crate) modified: DateTime<Local>,
    pub(crate) size: u64,
}

/// Recursively finds images under `root` last modified within `range`.
///
/// Ignored directories and hidden entries (names starting with `.`) are
/// pruned from the walk entirely. Entries are visited in file name order so
/// the result is deterministic.
///
/// # Errors
///
/// Returns an error if the metadata of a matching file cannot be read.
pub(crate) fn find_images(
    root: &Path,
    range: YearRange,
    ignore: &IgnoreList,
) -> CatalogResult<Vec<ScannedImage>> {
    tracing::info!(
        root = %root.display(),
        start_year = range.start,
        end_year = range.end,
        ignored = ignore.len(),
        "scanning for images"
    );

    let mut images = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !ignore.is_ignored(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_image_extension(entry.path()) {
            continue;
        }

        let path = entry.path();
        let metadata = entry
            .metadata()
            .map_err(|e| CatalogError::io(path, e.into()))?;
        let modified: DateTime<Local> = metadata
            .modified()
            .map_err(|e| CatalogError::io(path, e))?
            .into();

        if !range.contains(modified.year()) {
            tracing::trace!(path = %path.display(), year = modified.year(), "outside year range");
            continue;
        }

        images.push(ScannedImage {
            source: path.to_string_lossy().replace('\\', "/"),
            modified,
            size: metadata.len(),
        });
    }

    tracing::info!(found = images.len(), "scan finished");

    Ok(images)
}

/// The root itself is never hidden, even when its own name starts with `.`.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

pub(crate) fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) const MID_2019: i64 = 1_560_556_800;
    pub(crate) const MID_2020: i64 = 1_592_179_200;
    pub(crate) const MID_2021: i64 = 1_623_715_200;
    pub(crate) const MID_2023: i64 = 1_686_787_200;

    /// Writes a file and sets its modification time.
    pub(crate) fn touch(path: &Path, unix_time: i64) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"not really an image").unwrap();
        filetime::set_file_mtime(path, FileTime::from_unix_time(unix_time, 0)).unwrap();
    }

    fn names(images: &[ScannedImage]) -> Vec<String> {
        images
            .iter()
            .map(|i| i.source.rsplit('/').next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn filters_by_modified_year() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.jpg"), MID_2021);
        touch(&dir.path().join("b.png"), MID_2019);

        let range = YearRange::new(2020, Some(2022)).unwrap();
        let images = find_images(dir.path(), range, &IgnoreList::default()).unwrap();

        assert_eq!(names(&images), ["a.jpg"]);
        assert_eq!(images[0].modified.year(), 2021);
        assert_eq!(images[0].size, 19);
    }

    #[test]
    fn filters_by_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.JPG"), MID_2020);
        touch(&dir.path().join("b.jpeg"), MID_2020);
        touch(&dir.path().join("c.gif"), MID_2020);
        touch(&dir.path().join("d.txt"), MID_2020);
        touch(&dir.path().join("e.bmp"), MID_2020);
        touch(&dir.path().join("jpg"), MID_2020);

        let range = YearRange::new(2020, Some(2020)).unwrap();
        let images = find_images(dir.path(), range, &IgnoreList::default()).unwrap();

        assert_eq!(names(&images), ["a.JPG", "b.jpeg", "c.gif"]);
    }

    #[test]
    fn recurses_and_prunes_ignored_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("keep/one.jpg"), MID_2023);
        touch(&root.join("keep/deeper/two.png"), MID_2023);
        touch(&root.join("skip/three.jpg"), MID_2023);
        touch(&root.join("skip-not/four.jpg"), MID_2023);
        touch(&root.join("keep/five.jpg"), MID_2023);

        let ignore = IgnoreList::from_entries([root.join("skip"), root.join("keep/five.jpg")]);
        let range = YearRange::new(2023, Some(2023)).unwrap();
        let images = find_images(root, range, &ignore).unwrap();

        assert_eq!(names(&images), ["two.png", "one.jpg", "four.jpg"]);
        for image in &images {
            assert!(!ignore.is_ignored(Path::new(&image.source)));
            assert!(!image.source.contains('\\'));
        }
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let range = YearRange::new(2000, Some(2030)).unwrap();

        assert!(find_images(dir.path(), range, &IgnoreList::default()).unwrap().is_empty());
    }

    #[test]
    fn skips_hidden_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a.jpg"), MID_2021);
        touch(&root.join(".hidden.jpg"), MID_2021);
        touch(&root.join(".cache/thumbnails/t.png"), MID_2021);
        touch(&root.join(".local/share/Trash/files/old.jpg"), MID_2021);
        touch(&root.join("pics/.thumbs/b.jpg"), MID_2021);

        let range = YearRange::new(2021, Some(2021)).unwrap();
        let images = find_images(root, range, &IgnoreList::default()).unwrap();

        assert_eq!(names(&images), ["a.jpg"]);
    }

    #[test]
    fn hidden_root_is_still_scanned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".pictures");
        touch(&root.join("a.jpg"), MID_2021);

        let range = YearRange::new(2021, Some(2021)).unwrap();
        let images = find_images(&root, range, &IgnoreList::default()).unwrap();

        assert_eq!(names(&images), ["a.jpg"]);
    }
}
