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


//! Render the record editor.
//!
//! The form is drawn as a popup over the current view, one line per field,
//! with the focused field highlighted and the cursor placed in text inputs.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    components::{RecordEditor, editor::FieldValue},
    render::Render,
    theme::Theme,
};

const LABEL_WIDTH: u16 = 16;

const HELP: &str = " Enter/Ctrl-S save | Esc cancel | Ctrl-T trash | Tab next | \u{2190}/\u{2192} choose ";

impl Render for RecordEditor {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} - {} ", self.segment, self.source()))
            .title_bottom(HELP)
            .border_style(Style::default().fg(theme.accent_colour))
            .style(Style::default().bg(theme.background_colour));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(self.values.iter().map(|_| Constraint::Length(1)))
            .split(inner);

        for (idx, ((field, value), row)) in self.values.iter().zip(rows.iter()).enumerate() {
            let focused = idx == self.focus;

            let label_style = if focused {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.label_fg)
            };

            let value_span = match value {
                FieldValue::Fixed(text) => Span::styled(text.as_str(), Style::default().fg(theme.read_only_fg)),
                FieldValue::Text(input) => Span::styled(input.value(), Style::default().fg(theme.value_fg)),
                FieldValue::Choice { .. } => Span::styled(
                    format!("< {} >", value.text()),
                    Style::default().fg(theme.choice_fg),
                ),
            };

            let line = Line::from(vec![
                Span::styled(format!("{:<width$}", field.name(), width = LABEL_WIDTH as usize), label_style),
                value_span,
            ]);
            f.render_widget(Paragraph::new(line), *row);

            if focused {
                if let FieldValue::Text(input) = value {
                    let cursor_x = row.x + LABEL_WIDTH + input.visual_cursor() as u16;
                    f.set_cursor_position((cursor_x.min(row.right().saturating_sub(1)), row.y));
                }
            }
        }
    }
}
