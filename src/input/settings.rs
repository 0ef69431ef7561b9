//! Input settings
//!
//! Configuration applied when an input context is created.

use super::CursorMode;

/// Settings for an [`InputContext`](super::InputContext).
#[derive(Debug, Clone)]
pub struct InputSettings {
    /// Initial cursor mode.
    pub cursor_mode: CursorMode,
    /// Report keys released before they were polled as pressed once.
    pub sticky_keys: bool,
    /// Same as `sticky_keys`, for mouse buttons.
    pub sticky_mouse_buttons: bool,
    /// Pixels per scroll line, for wheels that report pixel deltas.
    pub scroll_pixels_per_line: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            cursor_mode: CursorMode::Normal,
            sticky_keys: false,
            sticky_mouse_buttons: false,
            scroll_pixels_per_line: 20.0,
        }
    }
}

impl InputSettings {
    /// Create new input settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial cursor mode.
    pub fn cursor_mode(mut self, mode: CursorMode) -> Self {
        self.cursor_mode = mode;
        self
    }

    /// Set sticky keys.
    pub fn sticky_keys(mut self, sticky: bool) -> Self {
        self.sticky_keys = sticky;
        self
    }

    /// Set sticky mouse buttons.
    pub fn sticky_mouse_buttons(mut self, sticky: bool) -> Self {
        self.sticky_mouse_buttons = sticky;
        self
    }

    /// Set the pixel-to-line scroll conversion.
    pub fn scroll_pixels_per_line(mut self, pixels: f32) -> Self {
        self.scroll_pixels_per_line = pixels;
        self
    }
}
