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

//! In-memory image catalog.
//!
//! A catalog maps segment names to the ordered records of that segment. This
//! is exactly the shape of the JSON file, so the type serializes
//! transparently.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::ignore::IgnoreList,
    error::{CatalogError, CatalogResult},
    model::ImageRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Catalog {
    segments: BTreeMap<String, Vec<ImageRecord>>,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_segment(name: String, records: Vec<ImageRecord>) -> Self {
        let mut segments = BTreeMap::new();
        segments.insert(name, records);
        Self { segments }
    }

    pub(crate) fn segment_names(&self) -> Vec<String> {
        self.segments.keys().cloned().collect()
    }

    pub(crate) fn segment(&self, name: &str) -> &[ImageRecord] {
        self.segments.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn record_count(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    pub(crate) fn find(&self, segment: &str, source: &str) -> Option<&ImageRecord> {
        self.segment(segment)
            .iter()
            .find(|r| same_source(&r.source, source))
    }

    /// Every `(segment, source)` pair in catalog order.
    pub(crate) fn sources(&self) -> Vec<(String, String)> {
        self.segments
            .iter()
            .flat_map(|(name, records)| records.iter().map(|r| (name.clone(), r.source.clone())))
            .collect()
    }

    /// Adds the records whose source is not already in the segment and is
    /// not ignored. Existing records are never touched.
    ///
    /// Returns the number of records added.
    pub(crate) fn merge(
        &mut self,
        segment: &str,
        records: Vec<ImageRecord>,
        ignore: &IgnoreList,
    ) -> usize {
        let existing = self.segments.entry(segment.to_string()).or_default();
        let mut known: HashSet<PathBuf> = existing.iter().map(|r| r.source_path().to_path_buf()).collect();
        let mut added = 0;

        for record in records {
            if ignore.is_ignored(record.source_path()) {
                tracing::debug!(source = %record.source, "skipping ignored path");
                continue;
            }
            if !known.insert(record.source_path().to_path_buf()) {
                continue;
            }
            tracing::debug!(source = %record.source, "adding record");
            existing.push(record);
            added += 1;
        }

        added
    }

    /// Replaces the record with the same source, last write wins.
    pub(crate) fn replace(&mut self, segment: &str, record: ImageRecord) -> CatalogResult<()> {
        let slot = self
            .segments
            .get_mut(segment)
            .and_then(|records| records.iter_mut().find(|r| same_source(&r.source, &record.source)))
            .ok_or_else(|| CatalogError::RecordNotFound {
                segment: segment.to_string(),
                source_path: record.source.clone(),
            })?;

        *slot = record;
        Ok(())
    }

    pub(crate) fn remove(&mut self, segment: &str, source: &str) -> CatalogResult<ImageRecord> {
        let not_found = || CatalogError::RecordNotFound {
            segment: segment.to_string(),
            source_path: source.to_string(),
        };

        let records = self.segments.get_mut(segment).ok_or_else(not_found)?;
        let idx = records
            .iter()
            .position(|r| same_source(&r.source, source))
            .ok_or_else(not_found)?;

        Ok(records.remove(idx))
    }

    /// Orders each segment most recently edited first. The sort is stable,
    /// so records with equal edit times keep their relative order.
    pub(crate) fn sort_by_edit_time(&mut self) {
        for records in self.segments.values_mut() {
            records.sort_by_key(|r| std::cmp::Reverse(r.edited_at()));
        }
    }

    /// Orders each segment by file modification date, newest first.
    pub(crate) fn sort_by_date_modified(&mut self) {
        for records in self.segments.values_mut() {
            records.sort_by(|a, b| b.date_modified.cmp(&a.date_modified));
        }
    }
}

/// Compares two stored sources as paths, so `a//b.jpg` and `a/b.jpg` match.
fn same_source(a: &str, b: &str) -> bool {
    a == b || Path::new(a) == Path::new(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, timestamp: Option<i64>) -> ImageRecord {
        ImageRecord {
            source: source.to_string(),
            timestamp,
            ..ImageRecord::default()
        }
    }

    fn sources(catalog: &Catalog, segment: &str) -> Vec<String> {
        catalog.segment(segment).iter().map(|r| r.source.clone()).collect()
    }

    #[test]
    fn merge_skips_existing_sources() {
        let mut catalog = Catalog::with_segment("detail_2021".into(), vec![record("/p/a.jpg", Some(5))]);
        let mut edited = record("/p/a.jpg", None);
        edited.artist = "someone".into();

        let added = catalog.merge(
            "detail_2021",
            vec![edited, record("/p/b.jpg", None)],
            &IgnoreList::default(),
        );

        assert_eq!(added, 1);
        assert_eq!(sources(&catalog, "detail_2021"), ["/p/a.jpg", "/p/b.jpg"]);
        assert_eq!(catalog.find("detail_2021", "/p/a.jpg").unwrap().artist, "");
    }

    #[test]
    fn merge_is_idempotent() {
        let scan = vec![record("/p/a.jpg", None), record("/p/b.jpg", None)];
        let mut catalog = Catalog::new();

        assert_eq!(catalog.merge("detail_2020", scan.clone(), &IgnoreList::default()), 2);
        let once = catalog.clone();
        assert_eq!(catalog.merge("detail_2020", scan, &IgnoreList::default()), 0);
        assert_eq!(catalog, once);
    }

    #[test]
    fn merge_matches_sources_as_paths_and_within_one_scan() {
        let mut catalog = Catalog::with_segment("s".into(), vec![record("/p/a.jpg", None)]);

        let added = catalog.merge(
            "s",
            vec![
                record("/p//a.jpg", None),
                record("/p/b.jpg", None),
                record("/p/b.jpg", None),
            ],
            &IgnoreList::default(),
        );

        assert_eq!(added, 1);
        assert_eq!(sources(&catalog, "s"), ["/p/a.jpg", "/p/b.jpg"]);
    }

    #[test]
    fn merge_excludes_ignored_paths() {
        let ignore = IgnoreList::from_entries(["/p/private"]);
        let mut catalog = Catalog::new();

        let added = catalog.merge(
            "detail_2020",
            vec![
                record("/p/private", None),
                record("/p/private/x.jpg", None),
                record("/p/private-not/y.jpg", None),
            ],
            &ignore,
        );

        assert_eq!(added, 1);
        assert_eq!(sources(&catalog, "detail_2020"), ["/p/private-not/y.jpg"]);
    }

    #[test]
    fn sort_by_edit_time_is_stable_and_descending() {
        let mut catalog = Catalog::with_segment(
            "s".into(),
            vec![
                record("a", None),
                record("b", Some(10)),
                record("c", None),
                record("d", Some(30)),
                record("e", Some(10)),
            ],
        );

        catalog.sort_by_edit_time();

        assert_eq!(sources(&catalog, "s"), ["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn sort_by_date_modified_descending() {
        let mut a = record("a", None);
        a.date_modified = "2019-01-01 00:00:00".into();
        let mut b = record("b", None);
        b.date_modified = "2021-06-01 12:00:00".into();
        let mut c = record("c", None);
        c.date_modified = "2020-03-01 08:30:00".into();

        let mut catalog = Catalog::with_segment("s".into(), vec![a, b, c]);
        catalog.sort_by_date_modified();

        assert_eq!(sources(&catalog, "s"), ["b", "c", "a"]);
    }

    #[test]
    fn replace_and_remove_by_source() {
        let mut catalog = Catalog::with_segment("s".into(), vec![record("/p/a.jpg", None), record("/p/b.jpg", None)]);

        let mut updated = record("/p//a.jpg", Some(1));
        updated.title = "Dawn".into();
        catalog.replace("s", updated).unwrap();
        assert_eq!(catalog.segment("s")[0].title, "Dawn");

        let removed = catalog.remove("s", "/p/b.jpg").unwrap();
        assert_eq!(removed.source, "/p/b.jpg");
        assert_eq!(catalog.record_count(), 1);

        assert!(matches!(
            catalog.remove("s", "/p/b.jpg"),
            Err(CatalogError::RecordNotFound { .. })
        ));
        assert!(catalog.replace("missing", record("/p/a.jpg", None)).is_err());
    }
}
