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

//! Catalog error types.
//!
//! Errors raised by the catalog core (scanning, building, persistence). The
//! application layers wrap these in [`anyhow::Error`] with extra context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("End year is required")]
    MissingEndYear,

    #[error("End year {end} should be greater than or equal to start year {start}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Cannot derive a year range from catalog name '{0}'")]
    InvalidSegmentName(String),

    #[error("No record for '{source_path}' in segment '{segment}'")]
    RecordNotFound { segment: String, source_path: String },

    #[error("The image file does not exist: {}", .0.display())]
    MissingImage(PathBuf),

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to move {} to the trash: {reason}", path.display())]
    Trash { path: PathBuf, reason: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub(crate) type CatalogResult<T> = Result<T, CatalogError>;
