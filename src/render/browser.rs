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


//! Render the catalog browser.
//!
//! Three columns: the segments of the open catalog, the records of the
//! selected segment, and the fields of the selected record.

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    browser::{BrowserPane, CatalogBrowser},
    model::schema::Field,
    theme::Theme,
};

/// Renders the catalog browser widget including segments, records and the
/// selected record's details.
pub(crate) fn draw_browser(f: &mut Frame, area: Rect, browser: &mut CatalogBrowser, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(45),
        ])
        .split(area);

    let segment_items: Vec<ListItem> = browser
        .segments
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    render_list(f, chunks[0], " Segments ", segment_items,
        &mut browser.segments_state, browser.active_pane == BrowserPane::Segment, theme);

    let record_items: Vec<ListItem> = browser
        .records
        .iter()
        .map(|r| {
            let path = Path::new(&r.source);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| r.source.clone());
            if path.exists() {
                ListItem::new(name)
            } else {
                ListItem::new(name).style(Style::default().fg(theme.missing_fg))
            }
        })
        .collect();

    let title = format!(" Records ({}) ", browser.records.len());
    render_list(f, chunks[1], &title, record_items,
        &mut browser.records_state, browser.active_pane == BrowserPane::Record, theme);

    let lines: Vec<Line> = match browser.selected_record() {
        Some(record) => Field::ALL
            .iter()
            .map(|field| {
                Line::from(vec![
                    Span::styled(format!("{:<14}", field.name()), Style::default().fg(theme.label_fg)),
                    Span::styled(field.get(record).to_string(), Style::default().fg(theme.value_fg)),
                ])
            })
            .collect(),
        None => vec![Line::from("No record selected")],
    };

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .border_style(Style::default().fg(theme.border_colour)),
        );
    f.render_widget(details, chunks[2]);
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    state: &mut ListState,
    is_active: bool,
    theme: &Theme,
) {
    let style = if is_active {
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    };

    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(style))
        .highlight_style(Style::default().bg(theme.status_bar_colour).fg(theme.accent_colour))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
