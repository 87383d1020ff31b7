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

//! Catalog persistence.
//!
//! This module reads and writes JSON catalog files and provides the
//! [`CatalogSession`], the single owner of an open catalog and its file path
//! for the lifetime of a viewer session.
//!
//! # File Format
//!
//! A catalog file is a JSON object mapping segment names to arrays of image
//! records. Files are always written indented with four spaces, UTF-8, with
//! non-ASCII text left unescaped.
//!
//! # Ordering
//!
//! Every save reorders each segment most recently edited first. This is the
//! only ordering a catalog file guarantees.

pub(crate) mod build;
pub(crate) mod ignore;
pub(crate) mod scan;
pub(crate) mod stats;
pub(crate) mod trash;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{
    catalog::trash::TrashBin,
    error::{CatalogError, CatalogResult},
    model::{Catalog, ImageRecord},
};

const INDENT: &[u8] = b"    ";

/// Reads a catalog file, indented or not.
pub(crate) fn read_catalog(path: &Path) -> CatalogResult<Catalog> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| CatalogError::json(path, e))
}

/// Writes the complete catalog to `path`, replacing any existing file.
pub(crate) fn write_catalog(path: &Path, catalog: &Catalog) -> CatalogResult<()> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    catalog
        .serialize(&mut serializer)
        .map_err(|e| CatalogError::json(path, e))?;
    buf.push(b'\n');

    fs::write(path, buf).map_err(|e| CatalogError::io(path, e))?;

    tracing::info!(path = %path.display(), records = catalog.record_count(), "catalog written");
    Ok(())
}

/// An open catalog.
///
/// The session holds the in-memory catalog for the file at `path`. Every
/// mutation rewrites the whole file.
#[derive(Debug)]
pub(crate) struct CatalogSession {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogSession {
    pub(crate) fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let catalog = read_catalog(&path)?;

        tracing::info!(path = %path.display(), records = catalog.record_count(), "catalog opened");

        Ok(Self { path, catalog })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Discards in-memory state and reads the file again.
    pub(crate) fn reload(&mut self) -> CatalogResult<()> {
        self.catalog = read_catalog(&self.path)?;
        Ok(())
    }

    pub(crate) fn segment_names(&self) -> Vec<String> {
        self.catalog.segment_names()
    }

    pub(crate) fn records(&self, segment: &str) -> &[ImageRecord] {
        self.catalog.segment(segment)
    }

    pub(crate) fn find(&self, segment: &str, source: &str) -> Option<&ImageRecord> {
        self.catalog.find(segment, source)
    }

    /// Looks up a record for editing, the image file must still exist.
    ///
    /// A missing image is reported as [`CatalogError::MissingImage`] and the
    /// record is left in place.
    pub(crate) fn editable_record(&self, segment: &str, source: &str) -> CatalogResult<&ImageRecord> {
        let record = self
            .find(segment, source)
            .ok_or_else(|| CatalogError::RecordNotFound {
                segment: segment.to_string(),
                source_path: source.to_string(),
            })?;

        if !record.source_path().exists() {
            return Err(CatalogError::MissingImage(record.source_path().to_path_buf()));
        }

        Ok(record)
    }

    /// Replaces the record with the same source and saves.
    pub(crate) fn update_record(&mut self, segment: &str, record: ImageRecord) -> CatalogResult<()> {
        self.catalog.replace(segment, record)?;
        self.save()
    }

    /// Moves the image into the trash, drops its record and saves.
    pub(crate) fn trash_record(
        &mut self,
        segment: &str,
        source: &str,
        bin: &TrashBin,
    ) -> CatalogResult<()> {
        if self.find(segment, source).is_none() {
            return Err(CatalogError::RecordNotFound {
                segment: segment.to_string(),
                source_path: source.to_string(),
            });
        }

        bin.discard(Path::new(source))?;
        self.catalog.remove(segment, source)?;
        self.save()
    }

    /// Reorders the view by file modification date. Not saved by itself.
    pub(crate) fn sort_by_date(&mut self) {
        self.catalog.sort_by_date_modified();
    }

    pub(crate) fn save(&mut self) -> CatalogResult<()> {
        self.catalog.sort_by_edit_time();
        write_catalog(&self.path, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::Field;
    use chrono::Local;
    use tempfile::TempDir;

    fn record(source: &str) -> ImageRecord {
        ImageRecord {
            source: source.to_string(),
            device_id: Some("device-1".into()),
            load_date: "2024-01-02 03:04:05".into(),
            date_modified: "2021-06-15 00:00:00".into(),
            ..ImageRecord::default()
        }
    }

    fn session_with(dir: &TempDir, records: Vec<ImageRecord>) -> CatalogSession {
        let path = dir.path().join("detail_2021.json");
        write_catalog(&path, &Catalog::with_segment("detail_2021".into(), records)).unwrap();
        CatalogSession::open(path).unwrap()
    }

    #[test]
    fn round_trip_indented_and_compact() {
        let dir = TempDir::new().unwrap();
        let mut first = record("/p/é.jpg");
        first.title = "Été".into();
        first.timestamp = Some(42);
        let catalog = Catalog::with_segment("detail_2021".into(), vec![first, record("/p/b.jpg")]);

        let pretty = dir.path().join("pretty.json");
        write_catalog(&pretty, &catalog).unwrap();
        let text = fs::read_to_string(&pretty).unwrap();
        assert!(text.contains("\n        {\n"));
        assert!(text.contains("Été"));
        assert_eq!(read_catalog(&pretty).unwrap(), catalog);

        let compact = dir.path().join("compact.json");
        fs::write(&compact, serde_json::to_string(&catalog).unwrap()).unwrap();
        assert_eq!(read_catalog(&compact).unwrap(), catalog);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_catalog(&path), Err(CatalogError::Json { .. })));
        assert!(matches!(
            read_catalog(&dir.path().join("absent.json")),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn edit_updates_only_edited_fields_and_moves_record_first() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with(&dir, vec![record("/p/a.jpg"), record("/p/b.jpg")]);

        let mut edited = session.find("detail_2021", "/p/b.jpg").unwrap().clone();
        Field::Category.set(&mut edited, "Work".into());
        edited.stamp(Local::now());
        session.update_record("detail_2021", edited).unwrap();

        let reread = read_catalog(session.path()).unwrap();
        let records = reread.segment("detail_2021");
        assert_eq!(records[0].source, "/p/b.jpg");
        assert_eq!(records[0].category, "Work");
        assert_eq!(records[0].device_id.as_deref(), Some("device-1"));
        assert_eq!(records[0].load_date, "2024-01-02 03:04:05");
        assert!(records[0].timestamp.is_some());
        assert_eq!(records[0].artist, "");
        assert_eq!(records[1], record("/p/a.jpg"));
    }

    #[test]
    fn trash_removes_record_and_relocates_file() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("pic.jpg");
        fs::write(&image, b"x").unwrap();
        let source = image.to_string_lossy().to_string();

        let mut session = session_with(&dir, vec![record(&source), record("/p/other.jpg")]);
        let bin = TrashBin::Directory(dir.path().join("trash"));

        session.trash_record("detail_2021", &source, &bin).unwrap();

        assert!(!image.exists());
        assert!(dir.path().join("trash/pic.jpg").exists());
        assert!(session.find("detail_2021", &source).is_none());

        let reread = read_catalog(session.path()).unwrap();
        assert_eq!(reread.record_count(), 1);
    }

    #[test]
    fn missing_image_is_not_editable_and_stays_cataloged() {
        let dir = TempDir::new().unwrap();
        let session = session_with(&dir, vec![record("/definitely/not/here.jpg")]);

        assert!(matches!(
            session.editable_record("detail_2021", "/definitely/not/here.jpg"),
            Err(CatalogError::MissingImage(_))
        ));
        assert!(session.find("detail_2021", "/definitely/not/here.jpg").is_some());
    }

    #[test]
    fn sort_by_date_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let mut older = record("/p/old.jpg");
        older.date_modified = "2019-01-01 00:00:00".into();
        let mut session = session_with(&dir, vec![older, record("/p/new.jpg")]);

        session.sort_by_date();
        assert_eq!(session.records("detail_2021")[0].source, "/p/new.jpg");

        session.reload().unwrap();
        assert_eq!(session.records("detail_2021")[0].source, "/p/old.jpg");
    }
}
