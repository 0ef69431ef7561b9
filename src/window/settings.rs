//! Window settings
//!
//! Configuration for window creation.

use crate::input::InputSettings;

/// Settings for creating a window.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Initial window size (width, height) in logical pixels.
    pub size: (u32, u32),
    /// Whether the window is resizable.
    pub resizable: bool,
    /// Whether to start maximized.
    pub maximized: bool,
    /// Input context configuration.
    pub input: InputSettings,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "lantern".to_string(),
            size: (1280, 720),
            resizable: true,
            maximized: false,
            input: InputSettings::default(),
        }
    }
}

impl WindowSettings {
    /// Create new window settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set whether the window is resizable.
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether to start maximized.
    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    /// Set the input configuration.
    pub fn input(mut self, input: InputSettings) -> Self {
        self.input = input;
        self
    }
}
