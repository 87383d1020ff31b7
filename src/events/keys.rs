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


//! Keyboard routing.
//!
//! A key goes to the first of these that wants it: an open notice (any key
//! dismisses it), the record editor, the command line, the active main view,
//! and finally the global bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    App, MainView,
    browser::BrowserPane,
    commander::Command,
    components::DeckAction,
    events::{
        AppEvent,
        handlers::{handle_command, handle_edit_outcome, handle_set_main_view, open_editor},
    },
};

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.notice.take().is_some() {
        return Ok(());
    }

    let event = Event::Key(key);

    if let Some(editor) = app.editor.as_mut() {
        if let Some(outcome) = editor.process_event(&event) {
            app.editor = None;
            handle_edit_outcome(app, outcome);
        }
        return Ok(());
    }

    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    let handled = match app.main_view {
        MainView::Browse => process_browser_key(app, key),
        MainView::Deck => match app.deck_view.process_event(&event) {
            Some(DeckAction::Edit(segment, source)) => {
                open_editor(app, segment, source);
                true
            }
            None => false,
        },
    };

    if !handled {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn process_browser_key(app: &mut App, key: KeyEvent) -> bool {
    let browser = &mut app.browser;

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if browser.next() {
                browser.load_records(&app.session);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if browser.previous() {
                browser.load_records(&app.session);
            }
        }

        KeyCode::Char('h') | KeyCode::Left => browser.active_pane = BrowserPane::Segment,
        KeyCode::Char('l') | KeyCode::Right => browser.active_pane = BrowserPane::Record,
        KeyCode::Tab => browser.toggle_pane(),

        KeyCode::Enter => {
            let selected = browser
                .selected_segment()
                .zip(browser.selected_record())
                .map(|(segment, record)| (segment.to_string(), record.source.clone()));

            if let Some((segment, source)) = selected {
                open_editor(app, segment, source);
            }
        }

        _ => return false,
    }

    true
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Char('d') => handle_set_main_view(app, MainView::Deck),
        KeyCode::Char('b') => handle_set_main_view(app, MainView::Browse),
        KeyCode::Char('r') => handle_command(app, Command::Refresh)?,
        KeyCode::Char('s') => handle_command(app, Command::SortByDate)?,
        _ => {}
    }

    Ok(())
}
