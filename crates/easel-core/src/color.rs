//! Color handling for board items
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Instruction files carry colors as free text; the
//! board client parses them with [`Color`] when it needs to compare two
//! spellings of the same color (`#ffff99` and `#FFFF99`, for instance).

use std::str::FromStr;

use color::{DynamicColor, Rgba8, Srgb};
use thiserror::Error;

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

impl ColorError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("light_yellow").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str.trim())
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns `true` if `other` parses to this same color.
    ///
    /// Unparsable text never matches.
    ///
    /// ```
    /// use easel_core::color::Color;
    ///
    /// let yellow = Color::new("#FFFF99").unwrap();
    /// assert!(yellow.matches("#ffff99"));
    /// assert!(!yellow.matches("yellow"));
    /// ```
    pub fn matches(&self, other: &str) -> bool {
        Color::new(other).is_ok_and(|other| other.to_rgba8() == self.to_rgba8())
    }

    /// The color as 8-bit sRGB components.
    pub fn to_rgba8(&self) -> Rgba8 {
        self.color.to_alpha_color::<Srgb>().to_rgba8()
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}
