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


//! Command-line input logic and state management.
//!
//! This module implements the `:` command line: a text input that, when a
//! command is submitted, parses it into a [`Command`] and dispatches it to the
//! application as an event.

use std::{path::PathBuf, sync::mpsc::Sender};

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, model::YearRange};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Quit,
    Open(PathBuf),
    Refresh,
    SortByDate,
    ShowDeck,
    ShowBrowser,
    NewCatalog {
        range: YearRange,
        catalog_dir: PathBuf,
        search_path: PathBuf,
        ignore_file: Option<PathBuf>,
        /// Replace an existing catalog file without asking.
        replace: bool,
    },
    UpdateCatalog {
        search_path: Option<PathBuf>,
        ignore_file: Option<PathBuf>,
    },
    ImageStats {
        dir: Option<PathBuf>,
        output: Option<PathBuf>,
    },
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` when the event was consumed by the command line.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    let event = match parse_command(&buffer) {
                        Ok(command) => AppEvent::Command(command),
                        Err(message) => AppEvent::Error(message),
                    };
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Parses one command line, without the leading `:`.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] | ["quit"] => Command::Quit,

        ["open", path] => Command::Open(PathBuf::from(path)),
        ["refresh"] => Command::Refresh,
        ["sortdate"] => Command::SortByDate,
        ["deck"] => Command::ShowDeck,
        ["browse"] => Command::ShowBrowser,

        [cmd @ ("new" | "new!"), start, end, catalog_dir, search_path, rest @ ..] if rest.len() <= 1 => {
            let start = parse_year(start)?;
            let end = parse_year(end)?;
            let range = YearRange::new(start, Some(end)).map_err(|e| e.to_string())?;
            Command::NewCatalog {
                range,
                catalog_dir: PathBuf::from(catalog_dir),
                search_path: PathBuf::from(search_path),
                ignore_file: rest.first().map(PathBuf::from),
                replace: *cmd == "new!",
            }
        }

        ["update", rest @ ..] if rest.len() <= 2 => Command::UpdateCatalog {
            search_path: rest.first().map(PathBuf::from),
            ignore_file: rest.get(1).map(PathBuf::from),
        },

        ["stats", rest @ ..] if rest.len() <= 2 => Command::ImageStats {
            dir: rest.first().map(PathBuf::from),
            output: rest.get(1).map(PathBuf::from),
        },

        ["new" | "new!", ..] => {
            return Err("usage: new <start> <end> <catalog_dir> <search_path> [ignore_file]".into());
        }
        ["open", ..] => return Err("usage: open <catalog_file>".into()),

        [] => return Err("No command".into()),
        [cmd, ..] => return Err(format!("Unknown command: {cmd}")),
    };

    Ok(command)
}

fn parse_year(text: &str) -> Result<i32, String> {
    text.parse().map_err(|_| format!("Not a year: {text}"))
}
