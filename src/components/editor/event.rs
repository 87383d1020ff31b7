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


//! Input handling for the record editor.
//!
//! Maps keyboard events to field navigation, option cycling and text input,
//! and to an [`EditOutcome`] when the form is finished.

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::components::{EditOutcome, RecordEditor};

impl RecordEditor {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<EditOutcome> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) => return Some(self.cancel()),
            (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                return Some(self.save(Local::now()));
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => return Some(self.trash(Local::now())),

            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.next_field(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.previous_field(),

            (KeyCode::Left, _) if !self.is_text_focused() => self.cycle_choice(false),
            (KeyCode::Right, _) if !self.is_text_focused() => self.cycle_choice(true),

            _ => {
                // Delegate everything else to the focused text input.
                if let Some(input) = self.focused_input() {
                    input.handle_event(event);
                }
            }
        }

        None
    }
}
