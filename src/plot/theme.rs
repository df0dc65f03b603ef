use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Built-in color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Resolved colors for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub gridline: Color,
    pub tick_bar: Color,
    pub tick_text: Color,
    pub legend_text: Color,
    pub crosshair: Color,
    pub annotation: Color,
}

impl Theme {
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::rgb8(0xF0, 0xF0, 0xF0),
                gridline: Color::WHITE,
                tick_bar: Color::WHITE,
                tick_text: Color::rgb8(0xAA, 0xAA, 0xAA),
                legend_text: Color::rgb8(0x44, 0x44, 0x44),
                crosshair: Color::rgb8(0x55, 0x55, 0x55),
                annotation: Color::rgb8(0x22, 0x22, 0x22),
            },
            Self::Dark => Palette {
                background: Color::rgb8(0x1E, 0x1E, 0x1E),
                gridline: Color::rgb8(0x2C, 0x2C, 0x2C),
                tick_bar: Color::rgb8(0x26, 0x26, 0x26),
                tick_text: Color::rgb8(0x80, 0x80, 0x80),
                legend_text: Color::rgb8(0xC8, 0xC8, 0xC8),
                crosshair: Color::rgb8(0xB0, 0xB0, 0xB0),
                annotation: Color::rgb8(0xE6, 0xE6, 0xE6),
            },
        }
    }
}
