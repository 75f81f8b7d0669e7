use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// ARGB color, `0xAARRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

pub const DEFAULT_HIGHLIGHT_COLOR: Color = Color::from_argb(0x4040_86F8);
pub const DEFAULT_HANDLE_COLOR: Color = Color::from_argb(0xFF40_86F8);

/// Per-surface selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    /// Background of the selected span
    pub highlight_color: Color,

    /// Fill of the drag handles
    pub handle_color: Color,

    /// Handle diameter in device units
    pub handle_size: f32,

    /// Show handles as soon as a long-press lands; otherwise the surface only
    /// records touches and waits for an explicit show
    pub show_on_long_press: bool,

    /// Chars selected by a long-press
    pub initial_span: usize,

    /// Horizontal drag hysteresis as a fraction of one char width
    pub dead_zone: f32,

    /// Delay before handles come back after a scroll settles
    pub reshow_delay_ms: u64,

    /// Transparent padding around a handle's visible circle, in pixels
    pub handle_padding: f32,

    /// Gap between toolbar and text, also the screen-edge margin
    pub toolbar_margin: f32,

    /// Size of one toolbar button as [width, height]
    pub toolbar_button_size: [f32; 2],
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            handle_color: DEFAULT_HANDLE_COLOR,
            handle_size: 24.0,
            show_on_long_press: true,
            initial_span: 1,
            dead_zone: 0.75,
            reshow_delay_ms: 100,
            handle_padding: 25.0,
            toolbar_margin: 16.0,
            toolbar_button_size: [72.0, 40.0],
        }
    }
}

impl SelectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.handle_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "handle_size",
                reason: format!("must be positive, got {}", self.handle_size),
            });
        }
        if self.initial_span == 0 {
            return Err(ConfigError::Invalid {
                field: "initial_span",
                reason: "must select at least one char".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ConfigError::Invalid {
                field: "dead_zone",
                reason: format!("must be in [0, 1), got {}", self.dead_zone),
            });
        }
        if self.handle_padding < 0.0 || self.toolbar_margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "handle_padding",
                reason: "padding and margins cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn reshow_delay(&self) -> Duration {
        Duration::from_millis(self.reshow_delay_ms)
    }

    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn with_handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    pub fn with_handle_size(mut self, size: f32) -> Self {
        self.handle_size = size;
        self
    }

    pub fn with_show_on_long_press(mut self, show: bool) -> Self {
        self.show_on_long_press = show;
        self
    }

    pub fn with_initial_span(mut self, span: usize) -> Self {
        self.initial_span = span;
        self
    }

    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    pub fn with_handle_padding(mut self, padding: f32) -> Self {
        self.handle_padding = padding;
        self
    }

    pub fn with_toolbar(mut self, button_size: [f32; 2], margin: f32) -> Self {
        self.toolbar_button_size = button_size;
        self.toolbar_margin = margin;
        self
    }
}
