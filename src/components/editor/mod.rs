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

//! Per-record editing form.
//!
//! The editor holds a working copy of one record's fields, shaped by the
//! field schema: read-only identity fields, free-text inputs, and fields
//! restricted to a fixed set of options. The form ends in one of three
//! outcomes, see [`EditOutcome`].

mod event;
mod render;

use chrono::{DateTime, Local};
use tui_input::Input;

use crate::model::{
    ImageRecord,
    schema::{Field, FieldKind},
};

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EditOutcome {
    /// Every editable field overwritten and the edit time stamped.
    Saved { segment: String, record: ImageRecord },
    /// Nothing is applied.
    Cancelled,
    /// The image goes to the trash and its record is dropped.
    Trashed { segment: String, record: ImageRecord },
}

pub(crate) enum FieldValue {
    Fixed(String),
    Text(Input),
    Choice {
        options: &'static [&'static str],
        /// `None` while the stored value is not one of the options.
        selected: Option<usize>,
        original: String,
    },
}

impl FieldValue {
    fn for_field(field: Field, record: &ImageRecord) -> Self {
        let value = field.get(record).to_string();
        match field.kind() {
            FieldKind::ReadOnly => FieldValue::Fixed(value),
            FieldKind::Text => FieldValue::Text(Input::new(value)),
            FieldKind::Choice(options) => FieldValue::Choice {
                options,
                selected: options.iter().position(|o| *o == value),
                original: value,
            },
        }
    }

    pub(crate) fn text(&self) -> &str {
        match self {
            FieldValue::Fixed(value) => value,
            FieldValue::Text(input) => input.value(),
            FieldValue::Choice {
                options,
                selected,
                original,
            } => selected.map(|i| options[i]).unwrap_or(original),
        }
    }
}

pub(crate) struct RecordEditor {
    pub(crate) segment: String,
    original: ImageRecord,
    pub(crate) values: Vec<(Field, FieldValue)>,
    pub(crate) focus: usize,
}

impl RecordEditor {
    pub(crate) fn new(segment: String, record: ImageRecord) -> Self {
        let values: Vec<(Field, FieldValue)> = Field::ALL
            .iter()
            .map(|&field| (field, FieldValue::for_field(field, &record)))
            .collect();

        let focus = values
            .iter()
            .position(|(field, _)| field.is_editable())
            .unwrap_or(0);

        Self {
            segment,
            original: record,
            values,
            focus,
        }
    }

    pub(crate) fn source(&self) -> &str {
        &self.original.source
    }

    pub(crate) fn focused_field(&self) -> Field {
        self.values[self.focus].0
    }

    pub(crate) fn value(&self, field: Field) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.text())
            .unwrap_or("")
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = self.step(1);
    }

    pub(crate) fn previous_field(&mut self) {
        self.focus = self.step(self.values.len() - 1);
    }

    /// Moves the focused choice field to the next (`forward`) or previous
    /// option.
    pub(crate) fn cycle_choice(&mut self, forward: bool) {
        if let FieldValue::Choice {
            options, selected, ..
        } = &mut self.values[self.focus].1
        {
            let len = options.len();
            *selected = Some(match (*selected, forward) {
                (None, true) => 0,
                (None, false) => len - 1,
                (Some(i), true) => (i + 1) % len,
                (Some(i), false) => (i + len - 1) % len,
            });
        }
    }

    pub(crate) fn is_text_focused(&self) -> bool {
        matches!(self.values[self.focus].1, FieldValue::Text(_))
    }

    pub(crate) fn focused_input(&mut self) -> Option<&mut Input> {
        match &mut self.values[self.focus].1 {
            FieldValue::Text(input) => Some(input),
            _ => None,
        }
    }

    /// The original record with every editable field replaced by the form
    /// value and the edit time stamped.
    pub(crate) fn apply(&self, now: DateTime<Local>) -> ImageRecord {
        let mut record = self.original.clone();
        for (field, value) in &self.values {
            if field.is_editable() {
                field.set(&mut record, value.text().to_string());
            }
        }
        record.stamp(now);
        record
    }

    pub(crate) fn save(&self, now: DateTime<Local>) -> EditOutcome {
        EditOutcome::Saved {
            segment: self.segment.clone(),
            record: self.apply(now),
        }
    }

    pub(crate) fn cancel(&self) -> EditOutcome {
        EditOutcome::Cancelled
    }

    /// Captures the current values and asks for the record to be trashed.
    pub(crate) fn trash(&self, now: DateTime<Local>) -> EditOutcome {
        EditOutcome::Trashed {
            segment: self.segment.clone(),
            record: self.apply(now),
        }
    }

    /// Next editable field index after moving `by` positions (mod len).
    fn step(&self, by: usize) -> usize {
        let len = self.values.len();
        let mut idx = self.focus;
        for _ in 0..len {
            idx = (idx + by) % len;
            if self.values[idx].0.is_editable() {
                return idx;
            }
        }
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn record() -> ImageRecord {
        ImageRecord {
            source: "/p/a.jpg".into(),
            device_id: Some("dev".into()),
            load_date: "2024-01-01 00:00:00".into(),
            date_modified: "2021-01-01 00:00:00".into(),
            category: "Personal".into(),
            media: "Oil on canvas".into(),
            title: "Dawn".into(),
            ..ImageRecord::default()
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn focus_on(editor: &mut RecordEditor, field: Field) {
        while editor.focused_field() != field {
            editor.next_field();
        }
    }

    #[test]
    fn focus_skips_read_only_fields() {
        let mut editor = RecordEditor::new("s".into(), record());
        assert_eq!(editor.focused_field(), Field::Artist);

        editor.previous_field();
        assert_eq!(editor.focused_field(), Field::Price);

        editor.next_field();
        assert_eq!(editor.focused_field(), Field::Artist);
    }

    #[test]
    fn save_changes_only_category_and_timestamp() {
        let mut editor = RecordEditor::new("detail_2021".into(), record());
        focus_on(&mut editor, Field::Category);
        editor.cycle_choice(false);
        assert_eq!(editor.value(Field::Category), "Work");

        let now = Local::now();
        let EditOutcome::Saved { segment, record: saved } = editor.save(now) else {
            panic!("expected a saved outcome");
        };

        let mut expected = record();
        expected.category = "Work".into();
        expected.timestamp = Some(now.timestamp());

        assert_eq!(segment, "detail_2021");
        assert_eq!(saved, expected);
    }

    #[test]
    fn unknown_choice_value_is_kept_until_cycled() {
        let mut editor = RecordEditor::new("s".into(), record());
        assert_eq!(editor.value(Field::Media), "Oil on canvas");

        focus_on(&mut editor, Field::Media);
        editor.cycle_choice(true);
        assert_eq!(editor.value(Field::Media), "Digital Art");
    }

    #[test]
    fn typing_edits_text_fields() {
        let mut editor = RecordEditor::new("s".into(), record());
        focus_on(&mut editor, Field::Title);

        assert!(editor.process_event(&key(KeyCode::Backspace)).is_none());
        editor.process_event(&key(KeyCode::Char('n')));
        editor.process_event(&key(KeyCode::Char('s')));

        assert_eq!(editor.value(Field::Title), "Dawns");
    }

    #[test]
    fn keys_map_to_outcomes() {
        let mut editor = RecordEditor::new("s".into(), record());
        assert_eq!(editor.process_event(&key(KeyCode::Esc)), Some(EditOutcome::Cancelled));
        assert!(matches!(editor.process_event(&ctrl('s')), Some(EditOutcome::Saved { .. })));
        assert!(matches!(editor.process_event(&ctrl('t')), Some(EditOutcome::Trashed { .. })));
    }

    #[test]
    fn trash_captures_current_values() {
        let mut editor = RecordEditor::new("s".into(), record());
        focus_on(&mut editor, Field::Artist);
        editor.process_event(&key(KeyCode::Char('X')));

        let EditOutcome::Trashed { record: trashed, .. } = editor.trash(Local::now()) else {
            panic!("expected a trashed outcome");
        };
        assert_eq!(trashed.artist, "X");
        assert_eq!(trashed.source, "/p/a.jpg");
    }
}
