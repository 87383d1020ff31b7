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


//! Colour palette for the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) status_bar_colour: Color,
    pub(crate) commander_colour: Color,

    pub(crate) label_fg: Color,
    pub(crate) value_fg: Color,
    pub(crate) read_only_fg: Color,
    pub(crate) choice_fg: Color,
    pub(crate) missing_fg: Color,

    pub(crate) notice_fg: Color,
    pub(crate) error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(28, 32, 40),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            status_bar_colour: Color::Rgb(44, 50, 62),
            commander_colour: Color::Rgb(255, 255, 255),

            label_fg: Color::Rgb(162, 161, 166),
            value_fg: Color::Rgb(255, 255, 255),
            read_only_fg: Color::Rgb(120, 120, 130),
            choice_fg: Color::Rgb(179, 157, 219),
            missing_fg: Color::Rgb(200, 90, 90),

            notice_fg: Color::Rgb(142, 192, 124),
            error_fg: Color::Rgb(251, 73, 52),
        }
    }
}
