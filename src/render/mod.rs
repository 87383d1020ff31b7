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


//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework: the main view (browser or deck), a
//! status bar, the command line, and the editor and notice popups drawn over
//! the main view.

mod browser;
mod commander;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    App, MainView,
    events::Notice,
    render::{browser::draw_browser, commander::draw_commander},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    match app.main_view {
        MainView::Browse => draw_browser(f, outer[0], &mut app.browser, &app.theme),
        MainView::Deck => app.deck_view.draw(f, outer[0], &app.theme),
    }

    draw_status_bar(f, outer[1], app);
    draw_commander(f, outer[2], app);

    if let Some(editor) = app.editor.as_mut() {
        let popup = centered_rect(outer[0], 90, 17);
        editor.draw(f, popup, &app.theme);
    }

    if let Some(notice) = &app.notice {
        draw_notice(f, outer[0], notice, &app.theme);
    }
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut text = format!(
        " {} | {} records",
        app.session.path().display(),
        app.session.catalog().record_count()
    );
    if app.is_open_catalog_pending() {
        text.push_str(" | updating...");
    }

    f.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(app.theme.label_fg)
                .bg(app.theme.status_bar_colour),
        ),
        area,
    );
}

fn draw_notice(f: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let popup = centered_rect(area, 60, 5);
    let colour = if notice.is_error { theme.error_fg } else { theme.notice_fg };

    let paragraph = Paragraph::new(Line::from(notice.text.as_str()))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(colour).bg(theme.background_colour))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(" press any key ")
                .border_style(Style::default().fg(colour)),
        );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// A rectangle of at most `width` by `height` centred in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
