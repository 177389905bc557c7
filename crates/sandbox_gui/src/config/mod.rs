//! Configuration system
//!
//! Serializable settings for the toolkit: window size, font selection, atlas
//! contents and the widget [`Style`]. Files are TOML or RON, chosen by
//! extension.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

use crate::foundation::math::{rgba, Color};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuiConfig {
    /// Window size in device pixels
    pub window_size: [u32; 2],
    /// Font selection
    pub font: FontConfig,
    /// Atlas contents
    pub atlas: AtlasConfig,
    /// Widget appearance
    pub style: Style,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            window_size: [1280, 720],
            font: FontConfig::default(),
            atlas: AtlasConfig::default(),
            style: Style::default(),
        }
    }
}

impl Config for GuiConfig {}

/// Font file, pixel size and the codepoints to rasterize up front
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a TrueType/OpenType file; `None` skips font loading
    pub path: Option<String>,
    /// Rasterization size in pixels
    pub pixel_size: f32,
    /// Inclusive codepoint ranges
    pub ranges: Vec<[u32; 2]>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            pixel_size: 14.0,
            ranges: vec![[0x20, 0x7E]],
        }
    }
}

impl FontConfig {
    /// Every valid character named by the configured ranges
    pub fn codepoints(&self) -> impl Iterator<Item = char> + '_ {
        self.ranges
            .iter()
            .flat_map(|&[first, last]| first..=last)
            .filter_map(char::from_u32)
    }
}

/// Procedural sprites registered at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtlasConfig {
    /// Largest rounded-corner radius in pixels (corners cover `1..=max`);
    /// clamped to [`MAX_CORNER_RADIUS`](crate::atlas::MAX_CORNER_RADIUS)
    pub max_corner_radius: u32,
    /// Largest line stroke width in pixels (lines cover `1..=max`);
    /// clamped to [`MAX_LINE_WIDTH`](crate::atlas::MAX_LINE_WIDTH)
    pub max_line_width: u32,
    /// Write the packed atlas to this PNG after preparing it
    pub debug_image_path: Option<String>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_corner_radius: crate::atlas::MAX_CORNER_RADIUS,
            max_line_width: crate::atlas::MAX_LINE_WIDTH,
            debug_image_path: None,
        }
    }
}

/// Widget colors and metrics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Style {
    /// Text color
    pub text: Color,
    /// Panel and scroll-area background
    pub panel: Color,
    /// Button gradient, top edge
    pub button_top: Color,
    /// Button gradient, bottom edge
    pub button_bottom: Color,
    /// Highlight used while hovering
    pub hover: Color,
    /// Highlight used while pressed
    pub pressed: Color,
    /// Text-edit background
    pub edit_background: Color,
    /// Selected text background
    pub selection: Color,
    /// Text cursor
    pub cursor: Color,
    /// Menu bar and popup background
    pub menu_background: Color,
    /// Scrollbar thumb and splitter divider
    pub handle: Color,
    /// Inner padding in pixels
    pub padding: f32,
    /// Corner radius for buttons and panels
    pub corner_radius: f32,
    /// Scrollbar width in pixels
    pub scrollbar_width: f32,
    /// Splitter divider thickness in pixels
    pub splitter_width: f32,
    /// Pixels scrolled per wheel notch
    pub scroll_step: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text: rgba(0.92, 0.92, 0.92, 1.0),
            panel: rgba(0.16, 0.16, 0.18, 1.0),
            button_top: rgba(0.38, 0.38, 0.42, 1.0),
            button_bottom: rgba(0.26, 0.26, 0.30, 1.0),
            hover: rgba(0.46, 0.46, 0.54, 1.0),
            pressed: rgba(0.20, 0.20, 0.24, 1.0),
            edit_background: rgba(0.10, 0.10, 0.12, 1.0),
            selection: rgba(0.25, 0.40, 0.70, 1.0),
            cursor: rgba(1.0, 1.0, 1.0, 1.0),
            menu_background: rgba(0.22, 0.22, 0.25, 1.0),
            handle: rgba(0.50, 0.50, 0.55, 1.0),
            padding: 4.0,
            corner_radius: 4.0,
            scrollbar_width: 10.0,
            splitter_width: 6.0,
            scroll_step: 20.0,
        }
    }
}
