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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::device::DEFAULT_DEVICE_FILE;

const CONFIG_NAME: &str = "artcat";

const LOG_FILE: &str = "artcat.log";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub device_file: PathBuf,
    pub ignore_file: Option<PathBuf>,
    pub trash_dir: Option<PathBuf>,
    pub default_search_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            device_file: PathBuf::from(DEFAULT_DEVICE_FILE),
            ignore_file: None,
            trash_dir: None,
            default_search_path: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Where scans look when no search path is given, the home directory
    /// unless configured.
    pub fn search_path(&self) -> PathBuf {
        self.default_search_path
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The viewer's log file, next to the configuration file unless
    /// configured.
    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }

        confy::get_configuration_file_path(CONFIG_NAME, None)
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join(LOG_FILE)))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE))
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
