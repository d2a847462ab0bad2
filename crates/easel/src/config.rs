//! Configuration types for replaying Easel instructions.
//!
//! This module provides the settings that control where requests are sent,
//! how sticky note colors are normalized, which styling defaults are applied
//! to created items and how a multi-file run is paced. All types implement
//! [`serde::Deserialize`] so they can be loaded from external sources, and
//! every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`ApiConfig`] - Remote board endpoint and request timeout.
//! - [`PaletteConfig`] - Mapping from hex colors to named sticky note colors.
//! - [`StyleConfig`] - Fixed styling applied to created items.
//! - [`RunConfig`] - Pacing of multi-file runs.
//!
//! # Example
//!
//! ```
//! # use easel::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.palette().normalize("#FFFF99"), Some("light_yellow"));
//! assert_eq!(config.api().timeout().as_secs(), 10);
//! ```

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

use easel_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote API section.
    #[serde(default)]
    api: ApiConfig,

    /// Sticky note palette section.
    #[serde(default)]
    palette: PaletteConfig,

    /// Item styling section.
    #[serde(default)]
    style: StyleConfig,

    /// Run pacing section.
    #[serde(default)]
    run: RunConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(api: ApiConfig, palette: PaletteConfig, style: StyleConfig, run: RunConfig) -> Self {
        Self {
            api,
            palette,
            style,
            run,
        }
    }

    /// Returns the remote API configuration.
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Returns the sticky note palette.
    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Returns the item styling configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the run pacing configuration.
    pub fn run(&self) -> &RunConfig {
        &self.run
    }

    /// Replaces the run pacing configuration.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }
}

/// Remote board API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    base_url: String,
    timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.miro.com/v2".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Creates a new [`ApiConfig`].
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the REST API, without the `/boards` segment.
    /// * `timeout_secs` - Per-request timeout in seconds.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    /// Returns the API root with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Palette used to translate sticky note colors into the board's named colors.
///
/// Boards only accept a fixed set of sticky note color names. Colors that are
/// already an allowed name pass through, colors listed in `sticky` are mapped
/// to their name, and anything else becomes `fallback` unless `strict` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    sticky: IndexMap<String, String>,
    allowed: Vec<String>,
    fallback: String,
    strict: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let sticky = [
            ("#FFE4E4", "light_pink"),
            ("#FFE4CC", "orange"),
            ("#E6F3FF", "light_blue"),
            ("#E6FFE6", "light_green"),
            ("#E0E0E0", "gray"),
            ("#FFFF99", "light_yellow"),
            ("#FFFF00", "yellow"),
            ("#FFD700", "yellow"),
        ]
        .into_iter()
        .map(|(hex, name)| (hex.to_string(), name.to_string()))
        .collect();

        let allowed = [
            "gray",
            "light_yellow",
            "yellow",
            "orange",
            "light_green",
            "green",
            "dark_green",
            "cyan",
            "light_pink",
            "pink",
            "violet",
            "red",
            "light_blue",
            "blue",
            "dark_blue",
            "black",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            sticky,
            allowed,
            fallback: "light_yellow".to_string(),
            strict: false,
        }
    }
}

impl PaletteConfig {
    /// Returns the color names the board accepts for sticky notes.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Returns the name used for colors with no mapping.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns whether unmapped colors are rejected instead of replaced.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Enables or disables strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Translates `color` into a sticky note color name.
    ///
    /// Returns `None` only in strict mode when `color` is neither an allowed
    /// name nor a mapped color.
    pub fn normalize(&self, color: &str) -> Option<&str> {
        let color = color.trim();

        if let Some(name) = self
            .allowed
            .iter()
            .find(|name| name.eq_ignore_ascii_case(color))
        {
            return Some(name);
        }

        let parsed = Color::new(color).ok();
        let mapped = self.sticky.iter().find(|(key, _)| match &parsed {
            Some(parsed) => parsed.matches(key),
            None => key.eq_ignore_ascii_case(color),
        });
        if let Some((_, name)) = mapped {
            return Some(name);
        }

        (!self.strict).then_some(self.fallback.as_str())
    }
}

/// Fixed styling applied to created items.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    frame_fill: String,
    border_color: String,
    border_width: String,
    font_size: String,
    light_text_color: String,
    dark_text_color: String,
    dark_text_fills: Vec<String>,
    text_color: String,
    sticky_width: f64,
    connector_color: String,
    connector_width: String,
    connector_end_cap: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            frame_fill: "#ffffff".to_string(),
            border_color: "#1a1a1a".to_string(),
            border_width: "2".to_string(),
            font_size: "14".to_string(),
            light_text_color: "#ffffff".to_string(),
            dark_text_color: "#000000".to_string(),
            dark_text_fills: vec!["#FFFF00".to_string(), "#FFD700".to_string()],
            text_color: "#000000".to_string(),
            sticky_width: 200.0,
            connector_color: "#2D2D2D".to_string(),
            connector_width: "2".to_string(),
            connector_end_cap: "stealth".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the frame fill color.
    pub fn frame_fill(&self) -> &str {
        &self.frame_fill
    }

    /// Returns the shape border color.
    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    /// Returns the shape border width.
    pub fn border_width(&self) -> &str {
        &self.border_width
    }

    /// Returns the font size used for shape labels.
    pub fn font_size(&self) -> &str {
        &self.font_size
    }

    /// Returns the label color for a shape filled with `fill`.
    ///
    /// Bright fills listed in `dark_text_fills` get dark text, everything
    /// else gets light text.
    pub fn label_color_for(&self, fill: &str) -> &str {
        let fill = Color::new(fill).ok();
        let dark = self.dark_text_fills.iter().any(|candidate| match &fill {
            Some(fill) => fill.matches(candidate),
            None => false,
        });
        if dark {
            &self.dark_text_color
        } else {
            &self.light_text_color
        }
    }

    /// Returns the color of free text items.
    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    /// Returns the width given to sticky notes.
    pub fn sticky_width(&self) -> f64 {
        self.sticky_width
    }

    /// Returns the connector stroke color.
    pub fn connector_color(&self) -> &str {
        &self.connector_color
    }

    /// Returns the connector stroke width.
    pub fn connector_width(&self) -> &str {
        &self.connector_width
    }

    /// Returns the cap drawn at the end of connectors.
    pub fn connector_end_cap(&self) -> &str {
        &self.connector_end_cap
    }
}

/// Pacing for runs over several instruction files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    file_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            file_delay_ms: 1000,
        }
    }
}

impl RunConfig {
    /// Creates a new [`RunConfig`] pausing `file_delay_ms` between files.
    pub fn new(file_delay_ms: u64) -> Self {
        Self { file_delay_ms }
    }

    /// Returns the pause inserted between consecutive files.
    pub fn file_delay(&self) -> Duration {
        Duration::from_millis(self.file_delay_ms)
    }
}
