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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, the image
//! record and the year range a catalog segment covers, representing the
//! schema of the JSON catalog files.

pub(crate) mod catalog;
pub(crate) mod deck;
pub(crate) mod schema;

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{CatalogError, CatalogResult};

pub(crate) use catalog::Catalog;

/// Format used for every date string stored in a catalog.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEGMENT_PREFIX: &str = "detail";

/// Metadata for one cataloged image.
///
/// The identity fields (`source`, `device_id`, `load_date`, `date_modified`)
/// are set when the image is first discovered, everything else is edited by
/// the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ImageRecord {
    pub(crate) source: String,
    #[serde(default)]
    pub(crate) device_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub(crate) load_date: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) date_modified: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) artist: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) media: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) category: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) location: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) year_of_work: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) for_sale: String,
    #[serde(default, deserialize_with = "text")]
    pub(crate) price: String,
    /// Unix time of the last edit.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "unix_seconds"
    )]
    pub(crate) timestamp: Option<i64>,
    /// Fields this version does not know about, kept so a save does not drop
    /// them.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl ImageRecord {
    /// Creates a freshly discovered record with blank descriptive fields.
    pub(crate) fn discovered(
        source: String,
        device_id: Option<String>,
        loaded: DateTime<Local>,
        modified: DateTime<Local>,
    ) -> Self {
        Self {
            source,
            device_id,
            load_date: loaded.format(DATE_FORMAT).to_string(),
            date_modified: modified.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn source_path(&self) -> &Path {
        Path::new(&self.source)
    }

    /// Last edit time used for ordering, records never edited sort last.
    pub(crate) fn edited_at(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }

    pub(crate) fn stamp(&mut self, at: DateTime<Local>) {
        self.timestamp = Some(at.timestamp());
    }
}

/// Accepts any JSON scalar for a free-text field.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accepts either an integer or a numeric string (older files stored the
/// edit time as a string).
fn unix_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid timestamp '{s}'"))),
        other => Err(D::Error::custom(format!("invalid timestamp {other}"))),
    }
}

/// An inclusive range of years covered by one catalog segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearRange {
    pub(crate) start: i32,
    pub(crate) end: i32,
}

impl YearRange {
    /// Validates a requested range, the end year is mandatory.
    pub(crate) fn new(start: i32, end: Option<i32>) -> CatalogResult<Self> {
        let end = end.ok_or(CatalogError::MissingEndYear)?;
        if end < start {
            return Err(CatalogError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub(crate) fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// The segment name for this range, `detail_2020` or `detail_2020_2023`.
    pub(crate) fn segment_name(&self) -> String {
        if self.start == self.end {
            format!("{SEGMENT_PREFIX}_{}", self.start)
        } else {
            format!("{SEGMENT_PREFIX}_{}_{}", self.start, self.end)
        }
    }

    /// Recovers the range from a segment name produced by [`segment_name`].
    ///
    /// [`segment_name`]: YearRange::segment_name
    pub(crate) fn from_segment_name(name: &str) -> CatalogResult<Self> {
        let invalid = || CatalogError::InvalidSegmentName(name.to_string());

        let mut parts = name.split('_');
        if parts.next() != Some(SEGMENT_PREFIX) {
            return Err(invalid());
        }

        let years: Vec<i32> = parts
            .map(|p| p.parse::<i32>().map_err(|_| invalid()))
            .collect::<CatalogResult<_>>()?;

        match years.as_slice() {
            [year] => Ok(Self {
                start: *year,
                end: *year,
            }),
            [start, end] if end >= start => Ok(Self {
                start: *start,
                end: *end,
            }),
            _ => Err(invalid()),
        }
    }

    /// Recovers the range from a catalog file such as `detail_2020_2023.json`.
    pub(crate) fn from_catalog_path(path: &Path) -> CatalogResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::InvalidSegmentName(path.display().to_string()))?;
        Self::from_segment_name(stem)
    }
}
