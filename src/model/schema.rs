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

//! Image record field schema.
//!
//! A single table describing each record field, whether it may be edited and
//! whether its value is free text or one of a fixed set of options. Both the
//! editor rendering and the save logic consult this table.

use crate::model::ImageRecord;

pub(crate) const CATEGORY_OPTIONS: &[&str] = &["Work", "Personal", "Other"];

pub(crate) const MEDIA_OPTIONS: &[&str] = &[
    "Digital Art",
    "Digital Photo",
    "Other",
    "Scanned Document",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    ReadOnly,
    Text,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Source,
    DeviceId,
    LoadDate,
    DateModified,
    Artist,
    Title,
    Media,
    Category,
    Location,
    Description,
    YearOfWork,
    ForSale,
    Price,
}

impl Field {
    /// All fields in display order.
    pub(crate) const ALL: [Field; 13] = [
        Field::Source,
        Field::DeviceId,
        Field::LoadDate,
        Field::DateModified,
        Field::Artist,
        Field::Title,
        Field::Media,
        Field::Category,
        Field::Location,
        Field::Description,
        Field::YearOfWork,
        Field::ForSale,
        Field::Price,
    ];

    /// The JSON key of the field.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Field::Source => "source",
            Field::DeviceId => "device_id",
            Field::LoadDate => "load_date",
            Field::DateModified => "date_modified",
            Field::Artist => "artist",
            Field::Title => "title",
            Field::Media => "media",
            Field::Category => "category",
            Field::Location => "location",
            Field::Description => "description",
            Field::YearOfWork => "year_of_work",
            Field::ForSale => "for_sale",
            Field::Price => "price",
        }
    }

    pub(crate) fn kind(self) -> FieldKind {
        match self {
            Field::Source | Field::DeviceId | Field::LoadDate | Field::DateModified => {
                FieldKind::ReadOnly
            }
            Field::Media => FieldKind::Choice(MEDIA_OPTIONS),
            Field::Category => FieldKind::Choice(CATEGORY_OPTIONS),
            _ => FieldKind::Text,
        }
    }

    pub(crate) fn is_editable(self) -> bool {
        self.kind() != FieldKind::ReadOnly
    }

    pub(crate) fn get(self, record: &ImageRecord) -> &str {
        match self {
            Field::Source => &record.source,
            Field::DeviceId => record.device_id.as_deref().unwrap_or(""),
            Field::LoadDate => &record.load_date,
            Field::DateModified => &record.date_modified,
            Field::Artist => &record.artist,
            Field::Title => &record.title,
            Field::Media => &record.media,
            Field::Category => &record.category,
            Field::Location => &record.location,
            Field::Description => &record.description,
            Field::YearOfWork => &record.year_of_work,
            Field::ForSale => &record.for_sale,
            Field::Price => &record.price,
        }
    }

    /// Writes an editable field. Read-only fields are left unchanged and
    /// `false` is returned.
    pub(crate) fn set(self, record: &mut ImageRecord, value: String) -> bool {
        let slot = match self {
            Field::Artist => &mut record.artist,
            Field::Title => &mut record.title,
            Field::Media => &mut record.media,
            Field::Category => &mut record.category,
            Field::Location => &mut record.location,
            Field::Description => &mut record.description,
            Field::YearOfWork => &mut record.year_of_work,
            Field::ForSale => &mut record.for_sale,
            Field::Price => &mut record.price,
            Field::Source | Field::DeviceId | Field::LoadDate | Field::DateModified => {
                return false;
            }
        };

        *slot = value;
        true
    }
}
