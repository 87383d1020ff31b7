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

//! Catalog browser state management.
//!
//! This module provides state for the catalog browser widget, managing the
//! selected segment and record, and navigating between the panes in the UI.

use ratatui::widgets::ListState;

use crate::{catalog::CatalogSession, model::ImageRecord};

#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) enum BrowserPane {
    #[default]
    Segment,
    Record,
}

#[derive(Default)]
pub(crate) struct CatalogBrowser {
    pub(crate) active_pane: BrowserPane,

    pub(crate) segments: Vec<String>,
    pub(crate) records: Vec<ImageRecord>,

    pub(crate) segments_state: ListState,
    pub(crate) records_state: ListState,
}

impl CatalogBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn toggle_pane(&mut self) {
        self.active_pane = match self.active_pane {
            BrowserPane::Segment => BrowserPane::Record,
            BrowserPane::Record => BrowserPane::Segment,
        };
    }

    pub(crate) fn selected_segment(&self) -> Option<&str> {
        let index = self.segments_state.selected()?;
        self.segments.get(index).map(String::as_str)
    }

    pub(crate) fn selected_record(&self) -> Option<&ImageRecord> {
        let index = self.records_state.selected()?;
        self.records.get(index)
    }

    /// Moves down in the active pane. Returns `true` when the segment changed
    /// and the record list needs reloading.
    pub(crate) fn next(&mut self) -> bool {
        match self.active_pane {
            BrowserPane::Segment => {
                Self::step_next(&mut self.segments_state, self.segments.len());
                true
            }
            BrowserPane::Record => {
                Self::step_next(&mut self.records_state, self.records.len());
                false
            }
        }
    }

    pub(crate) fn previous(&mut self) -> bool {
        match self.active_pane {
            BrowserPane::Segment => {
                Self::step_previous(&mut self.segments_state, self.segments.len());
                true
            }
            BrowserPane::Record => {
                Self::step_previous(&mut self.records_state, self.records.len());
                false
            }
        }
    }

    /// Reloads segments and records from the session, keeping the current
    /// segment and record selected when they still exist.
    pub(crate) fn refresh(&mut self, session: &CatalogSession) {
        let current_segment = self.selected_segment().map(str::to_string);
        let current_source = self.selected_record().map(|r| r.source.clone());

        self.segments = session.segment_names();
        let segment_idx = current_segment
            .and_then(|name| self.segments.iter().position(|s| *s == name))
            .or((!self.segments.is_empty()).then_some(0));
        self.segments_state.select(segment_idx);

        self.load_records(session);

        if let Some(source) = current_source {
            if let Some(idx) = self.records.iter().position(|r| r.source == source) {
                self.records_state.select(Some(idx));
            }
        }
    }

    /// Reloads the records of the selected segment, selecting the first.
    pub(crate) fn load_records(&mut self, session: &CatalogSession) {
        self.records = self
            .selected_segment()
            .map(|segment| session.records(segment).to_vec())
            .unwrap_or_default();
        self.records_state.select((!self.records.is_empty()).then_some(0));
    }

    fn step_next(state: &mut ListState, len: usize) {
        if len == 0 { return; }
        let i = match state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        state.select(Some(i));
    }

    fn step_previous(state: &mut ListState, len: usize) {
        if len == 0 { return; }
        let i = match state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::write_catalog, model::Catalog};
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> CatalogSession {
        let mut catalog = Catalog::with_segment(
            "detail_2020".into(),
            vec![record("/p/a.jpg"), record("/p/b.jpg")],
        );
        catalog.merge("detail_2021", vec![record("/p/c.jpg")], &Default::default());

        let path = dir.path().join("catalog.json");
        write_catalog(&path, &catalog).unwrap();
        CatalogSession::open(path).unwrap()
    }

    fn record(source: &str) -> ImageRecord {
        ImageRecord {
            source: source.into(),
            ..ImageRecord::default()
        }
    }

    #[test]
    fn refresh_selects_first_segment_and_record() {
        let dir = TempDir::new().unwrap();
        let mut browser = CatalogBrowser::new();

        browser.refresh(&session(&dir));

        assert_eq!(browser.selected_segment(), Some("detail_2020"));
        assert_eq!(browser.selected_record().unwrap().source, "/p/a.jpg");
    }

    #[test]
    fn navigation_wraps_and_reloads_segment_records() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let mut browser = CatalogBrowser::new();
        browser.refresh(&session);

        browser.toggle_pane();
        assert!(!browser.next());
        assert_eq!(browser.selected_record().unwrap().source, "/p/b.jpg");
        browser.next();
        assert_eq!(browser.selected_record().unwrap().source, "/p/a.jpg");

        browser.toggle_pane();
        assert!(browser.previous());
        browser.load_records(&session);
        assert_eq!(browser.selected_segment(), Some("detail_2021"));
        assert_eq!(browser.selected_record().unwrap().source, "/p/c.jpg");
    }

    #[test]
    fn refresh_keeps_selection() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let mut browser = CatalogBrowser::new();
        browser.refresh(&session);
        browser.toggle_pane();
        browser.next();

        browser.refresh(&session);

        assert_eq!(browser.selected_record().unwrap().source, "/p/b.jpg");
    }
}
