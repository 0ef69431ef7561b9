//! Cursor capture and warping
//!
//! [`CursorControl`] is the seam to the windowing system. The input context
//! only ever talks to the single window through it.

use super::InputError;
use glam::Vec2;

/// How the cursor behaves over the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorMode {
    /// Visible and free to leave the window.
    #[default]
    Normal,
    /// Invisible over the window, still free to leave it.
    Hidden,
    /// Invisible and captured, for mouse-look.
    Disabled,
}

/// Cursor requests forwarded to the windowing system.
pub trait CursorControl {
    /// Apply a cursor mode.
    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), InputError>;

    /// Warp the cursor to a position in window pixels.
    fn set_cursor_position(&mut self, position: Vec2) -> Result<(), InputError>;
}

/// Cursor control with no window behind it. Records the last requests.
#[derive(Debug, Clone, Default)]
pub struct DetachedCursor {
    pub mode: CursorMode,
    pub position: Vec2,
}

impl CursorControl for DetachedCursor {
    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), InputError> {
        self.mode = mode;
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Vec2) -> Result<(), InputError> {
        self.position = position;
        Ok(())
    }
}

/// Cursor control backed by a winit window.
#[cfg(feature = "window")]
pub struct WinitCursor {
    window: std::sync::Arc<winit::window::Window>,
}

#[cfg(feature = "window")]
impl WinitCursor {
    pub fn new(window: std::sync::Arc<winit::window::Window>) -> Self {
        Self { window }
    }
}

#[cfg(feature = "window")]
impl CursorControl for WinitCursor {
    fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), InputError> {
        use winit::window::CursorGrabMode;

        match mode {
            CursorMode::Normal => {
                self.window.set_cursor_grab(CursorGrabMode::None)?;
                self.window.set_cursor_visible(true);
            }
            CursorMode::Hidden => {
                self.window.set_cursor_grab(CursorGrabMode::None)?;
                self.window.set_cursor_visible(false);
            }
            CursorMode::Disabled => {
                // Locked is unsupported on some platforms (X11, Windows).
                if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::Locked) {
                    tracing::warn!("cursor lock unavailable ({e}), confining instead");
                    self.window.set_cursor_grab(CursorGrabMode::Confined)?;
                }
                self.window.set_cursor_visible(false);
            }
        }
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Vec2) -> Result<(), InputError> {
        let position = winit::dpi::PhysicalPosition::new(position.x as f64, position.y as f64);
        self.window.set_cursor_position(position)?;
        Ok(())
    }
}
