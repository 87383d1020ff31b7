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

//! Workstation identity.
//!
//! Each machine that catalogs images has a small JSON file holding its host
//! name and a random identifier, so records can tell which workstation
//! discovered them.

use std::{fs, path::Path};

use chrono::Local;
use serde::{Deserialize, Serialize};
use sysinfo::System;
use uuid::Uuid;

use crate::{
    error::{CatalogError, CatalogResult},
    model::DATE_FORMAT,
};

pub(crate) const DEFAULT_DEVICE_FILE: &str = "device_id.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DeviceIdentity {
    pub(crate) hostname: String,
    pub(crate) device_id: String,
    pub(crate) create_date: String,
}

impl DeviceIdentity {
    pub(crate) fn generate() -> Self {
        Self {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            device_id: Uuid::new_v4().to_string(),
            create_date: Local::now().format(DATE_FORMAT).to_string(),
        }
    }
}

/// Generates a new identity and writes it to `path`.
///
/// # Errors
///
/// Returns [`CatalogError::AlreadyExists`] if `path` exists and `replace` is
/// not set, or an error if the file cannot be written.
pub(crate) fn create_identity_file(path: &Path, replace: bool) -> CatalogResult<DeviceIdentity> {
    if path.exists() && !replace {
        return Err(CatalogError::AlreadyExists(path.to_path_buf()));
    }

    let identity = DeviceIdentity::generate();
    let json = serde_json::to_string_pretty(&identity).map_err(|e| CatalogError::json(path, e))?;
    fs::write(path, json).map_err(|e| CatalogError::io(path, e))?;

    tracing::info!(path = %path.display(), device_id = %identity.device_id, "device identity created");
    Ok(identity)
}

/// Reads the device identifier from an identity file.
///
/// Every failure is logged and yields `None`, a scan then proceeds without a
/// device identifier.
pub(crate) fn read_device_id(path: &Path) -> Option<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Error loading device file: {}", e);
            return None;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Error parsing device file: {}", e);
            return None;
        }
    };

    let device_id = value.get("device_id").and_then(|v| v.as_str()).map(str::to_string);
    if device_id.is_none() {
        tracing::warn!(path = %path.display(), "'device_id' not found in device file");
    }

    device_id
}
