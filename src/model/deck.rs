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

//! Picture deck paging.
//!
//! The deck presents every image in the catalog a fixed-size page at a time.

pub(crate) const PAGE_SIZE: usize = 25;
pub(crate) const COLUMNS: usize = 5;

#[derive(Debug, Default)]
pub(crate) struct Deck {
    /// `(segment, source)` pairs.
    pub(crate) items: Vec<(String, String)>,
    pub(crate) page: usize,
    /// Index within the current page.
    pub(crate) cursor: usize,
}

impl Deck {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_items(&mut self, items: Vec<(String, String)>) {
        self.items = items;
        self.page = self.page.min(self.last_page());
        self.clamp_cursor();
    }

    pub(crate) fn last_page(&self) -> usize {
        self.items.len().saturating_sub(1) / PAGE_SIZE
    }

    pub(crate) fn page_items(&self) -> &[(String, String)] {
        let start = (self.page * PAGE_SIZE).min(self.items.len());
        let end = (start + PAGE_SIZE).min(self.items.len());
        &self.items[start..end]
    }

    pub(crate) fn selected(&self) -> Option<&(String, String)> {
        self.page_items().get(self.cursor)
    }

    pub(crate) fn first_page(&mut self) {
        self.page = 0;
        self.clamp_cursor();
    }

    pub(crate) fn final_page(&mut self) {
        self.page = self.last_page();
        self.clamp_cursor();
    }

    pub(crate) fn next_page(&mut self) {
        if self.page < self.last_page() {
            self.page += 1;
            self.clamp_cursor();
        }
    }

    pub(crate) fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.clamp_cursor();
        }
    }

    pub(crate) fn next_item(&mut self) {
        let len = self.page_items().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub(crate) fn previous_item(&mut self) {
        let len = self.page_items().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    pub(crate) fn down_row(&mut self) {
        let len = self.page_items().len();
        if self.cursor + COLUMNS < len {
            self.cursor += COLUMNS;
        }
    }

    pub(crate) fn up_row(&mut self) {
        if self.cursor >= COLUMNS {
            self.cursor -= COLUMNS;
        }
    }

    /// Title text such as `Image Deck - 26 thru 50 of 60 images`.
    pub(crate) fn title(&self) -> String {
        let total = self.items.len();
        let start = if total == 0 { 0 } else { self.page * PAGE_SIZE + 1 };
        let end = ((self.page + 1) * PAGE_SIZE).min(total);
        format!("Image Deck - {start} thru {end} of {total} images")
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_items().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
