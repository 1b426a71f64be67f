use std::fmt;
use std::str::FromStr;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::SpectaclesError;

/// Frame colors the renderer knows how to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// `(0, 0, 0)`
    #[default]
    Black,
    /// `(255, 0, 0)`
    Red,
    /// `(0, 255, 0)`
    Green,
    /// `(0, 0, 255)`
    Blue,
    /// `(255, 255, 255)`
    White,
}

impl Color {
    /// Every supported color, in palette order.
    pub const ALL: [Color; 5] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
    ];

    /// The RGB value drawn for this color.
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            Color::Black => Rgb([0, 0, 0]),
            Color::Red => Rgb([255, 0, 0]),
            Color::Green => Rgb([0, 255, 0]),
            Color::Blue => Rgb([0, 0, 255]),
            Color::White => Rgb([255, 255, 255]),
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = SpectaclesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpectaclesError::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
