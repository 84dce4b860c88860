// src/color.rs

//! Defines the panel color type (`Color`), channel ordering (`ColorOrder`)
//! and the board's named palette.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit-per-channel RGB color as stored in the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Same intensity on all three channels.
    pub const fn gray(level: u8) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    pub fn is_black(&self) -> bool {
        *self == palette::BLACK
    }

    /// Scales every channel by `ceiling / 255`, so no channel exceeds `ceiling`.
    ///
    /// Full-range 255 maps exactly to `ceiling`; 0 stays 0.
    pub fn scaled(&self, ceiling: u8) -> Color {
        let scale = |v: u8| ((v as u16 * ceiling as u16 + 127) / 255) as u8;
        Color {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

/// Uppercase `RRGGBB`, the format used by the diagnostic export.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Order in which the LED controller expects the three channels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Returns the channels of `color` in wire order.
    pub fn apply(&self, color: Color) -> [u8; 3] {
        let Color { r, g, b } = color;
        match self {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Rbg => [r, b, g],
            ColorOrder::Grb => [g, r, b],
            ColorOrder::Gbr => [g, b, r],
            ColorOrder::Brg => [b, r, g],
            ColorOrder::Bgr => [b, g, r],
        }
    }
}

/// Standard colors shared by everything drawing on the board.
/// Channel values sit at the board's safe level of 60.
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(60, 0, 0);
    pub const GREEN: Color = Color::new(0, 60, 0);
    pub const BLUE: Color = Color::new(0, 0, 60);
    pub const YELLOW: Color = Color::new(60, 60, 0);
    pub const CYAN: Color = Color::new(0, 60, 60);
    pub const MAGENTA: Color = Color::new(60, 0, 60);
    pub const WHITE: Color = Color::new(60, 60, 60);
    pub const ORANGE: Color = Color::new(60, 30, 0);
    pub const PURPLE: Color = Color::new(30, 0, 60);
}
