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


//! Render the image deck as a grid of cards.

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    components::DeckView,
    model::deck::{COLUMNS, PAGE_SIZE},
    render::Render,
    theme::Theme,
};

impl Render for DeckView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.deck.title()))
            .title_bottom(" h/l page | g/G first/last | arrows move | Enter edit ")
            .border_style(Style::default().fg(theme.border_colour));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let row_count = PAGE_SIZE / COLUMNS;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints((0..row_count).map(|_| Constraint::Ratio(1, row_count as u32)))
            .split(inner);

        for (idx, (segment, source)) in self.deck.page_items().iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints((0..COLUMNS).map(|_| Constraint::Ratio(1, COLUMNS as u32)))
                .split(rows[idx / COLUMNS]);
            let cell = columns[idx % COLUMNS];

            let selected = idx == self.deck.cursor;
            let border_style = if selected {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.border_colour)
            };

            let path = Path::new(source);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.clone());
            let name_style = if path.exists() {
                Style::default().fg(theme.value_fg)
            } else {
                Style::default().fg(theme.missing_fg).add_modifier(Modifier::CROSSED_OUT)
            };

            let card = Paragraph::new(vec![
                Line::styled(name, name_style),
                Line::styled(segment.as_str(), Style::default().fg(theme.label_fg)),
            ])
            .block(Block::default().borders(Borders::ALL).border_style(border_style));

            f.render_widget(card, cell);
        }
    }
}
