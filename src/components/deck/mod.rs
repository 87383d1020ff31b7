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


//! Paged grid view over every cataloged image.

mod event;
mod render;

use crate::{catalog::CatalogSession, model::deck::Deck};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeckAction {
    /// Open the editor for `(segment, source)`.
    Edit(String, String),
}

pub(crate) struct DeckView {
    pub(crate) deck: Deck,
}

impl DeckView {
    pub(crate) fn new() -> Self {
        Self { deck: Deck::new() }
    }

    /// Reloads the deck items from the session, keeping the page where
    /// possible.
    pub(crate) fn refresh(&mut self, session: &CatalogSession) {
        self.deck.set_items(session.catalog().sources());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn view_of(n: usize) -> DeckView {
        let mut view = DeckView::new();
        view.deck
            .set_items((0..n).map(|i| ("detail_2021".to_string(), format!("/p/{i}.jpg"))).collect());
        view
    }

    #[test]
    fn page_keys_move_between_pages() {
        let mut view = view_of(60);

        view.process_event(&key(KeyCode::Char('l')));
        assert_eq!(view.deck.page, 1);
        view.process_event(&key(KeyCode::Char('G')));
        assert_eq!(view.deck.page, 2);
        view.process_event(&key(KeyCode::Char('h')));
        assert_eq!(view.deck.page, 1);
        view.process_event(&key(KeyCode::Char('g')));
        assert_eq!(view.deck.page, 0);
    }

    #[test]
    fn enter_edits_selected_image() {
        let mut view = view_of(30);
        view.process_event(&key(KeyCode::Char('l')));
        view.process_event(&key(KeyCode::Right));

        let action = view.process_event(&key(KeyCode::Enter));

        assert_eq!(
            action,
            Some(DeckAction::Edit("detail_2021".into(), "/p/26.jpg".into()))
        );
    }

    #[test]
    fn enter_on_empty_deck_does_nothing() {
        let mut view = view_of(0);
        assert_eq!(view.process_event(&key(KeyCode::Enter)), None);
    }
}
