//! Frame input/output types
//!
//! Types for passing data to and from the frame callback.

use crate::input::InputContext;

/// Per-frame view handed to the callback.
pub struct Frame<'a> {
    /// Input state for this frame. Gamepads are already polled.
    pub input: &'a mut InputContext,
    /// Input clock reading in seconds.
    pub elapsed_time: f64,
    /// Time elapsed since the last frame in seconds.
    pub delta_time: f64,
    /// Window size in physical pixels.
    pub size: (u32, u32),
}

impl Frame<'_> {
    /// Get the window aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.size.0 as f32 / self.size.1.max(1) as f32
    }
}

/// Output data from a frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Whether to exit the application.
    pub exit: bool,
}

impl FrameOutput {
    /// Create a new frame output that doesn't exit.
    pub fn new() -> Self {
        Self { exit: false }
    }

    /// Create a frame output that exits the application.
    pub fn exit() -> Self {
        Self { exit: true }
    }
}
