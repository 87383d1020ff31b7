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


use crossterm::event::{Event, KeyCode};

use crate::components::{DeckAction, DeckView};

impl DeckView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<DeckAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('g') => self.deck.first_page(),
            KeyCode::Char('G') => self.deck.final_page(),
            KeyCode::Char('h') | KeyCode::PageUp => self.deck.previous_page(),
            KeyCode::Char('l') | KeyCode::PageDown => self.deck.next_page(),

            KeyCode::Left => self.deck.previous_item(),
            KeyCode::Right => self.deck.next_item(),
            KeyCode::Char('j') | KeyCode::Down => self.deck.down_row(),
            KeyCode::Char('k') | KeyCode::Up => self.deck.up_row(),

            KeyCode::Enter => {
                return self
                    .deck
                    .selected()
                    .map(|(segment, source)| DeckAction::Edit(segment.clone(), source.clone()));
            }

            _ => {}
        }

        None
    }
}
