//! Poll-driven input
//!
//! [`InputContext`] owns everything the game loop samples each frame: key and
//! mouse button state, cursor position, scroll offsets, gamepad snapshots and
//! a resettable clock. Window events are pushed into it by the host loop;
//! game code reads it with plain queries.
//!
//! # Per-frame contract
//!
//! 1. The host routes window events (`handle_window_event` or the `on_*`
//!    methods).
//! 2. The host calls [`InputContext::update_gamepads`] once before gamepad
//!    queries.
//! 3. Game code queries.
//! 4. The host calls [`InputContext::end_frame`], which only clears the
//!    per-frame scroll accumulator. [`InputContext::scroll_offset`] keeps the
//!    last event's offset until the next scroll.

pub mod clock;
pub mod cursor;
pub mod gamepad;
pub mod key;
pub mod settings;

pub use clock::Clock;
pub use cursor::{CursorControl, CursorMode, DetachedCursor};
pub use gamepad::{
    GamepadAxes, GamepadButton, GamepadButtons, GamepadDriver, Gamepads, NoGamepads,
    RawGamepadState, VirtualGamepads, MAX_GAMEPADS,
};
pub use key::{Key, MouseButton};

#[cfg(feature = "gilrs")]
pub mod hardware;
#[cfg(feature = "gilrs")]
pub use hardware::HardwareGamepads;
pub use settings::InputSettings;

#[cfg(feature = "window")]
pub use cursor::WinitCursor;

use glam::Vec2;
use std::collections::HashSet;
use std::hash::Hash;

/// Errors from input operations.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The windowing system rejected a cursor request.
    #[cfg(feature = "window")]
    #[error("cursor request rejected: {0}")]
    Cursor(#[from] winit::error::ExternalError),
    /// A clock value that is negative, NaN or infinite.
    #[error("invalid clock time {0}")]
    InvalidTime(f64),
    /// The gamepad backend could not be opened.
    #[error("gamepad backend unavailable: {0}")]
    GamepadBackend(String),
    /// A raw gamepad blob of the wrong size.
    #[error("gamepad state blob must be {expected} bytes, got {got}")]
    GamepadBlob { expected: usize, got: usize },
}

/// State of a key or button as seen by a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// Held buttons plus releases not yet observed by a sticky poll.
#[derive(Debug, Clone)]
struct ButtonTracker<T> {
    held: HashSet<T>,
    unpolled_releases: HashSet<T>,
    sticky: bool,
}

impl<T: Copy + Eq + Hash> ButtonTracker<T> {
    fn new(sticky: bool) -> Self {
        Self {
            held: HashSet::new(),
            unpolled_releases: HashSet::new(),
            sticky,
        }
    }

    fn press(&mut self, button: T) {
        self.unpolled_releases.remove(&button);
        self.held.insert(button);
    }

    fn release(&mut self, button: T) {
        if self.held.remove(&button) && self.sticky {
            self.unpolled_releases.insert(button);
        }
    }

    /// Poll a button, consuming a pending sticky release.
    fn poll(&mut self, button: T) -> ButtonState {
        if self.held.contains(&button) {
            return ButtonState::Pressed;
        }
        self.unpolled_releases.remove(&button).into()
    }

    fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
        if !sticky {
            self.unpolled_releases.clear();
        }
    }

    /// Drop every held button without leaving sticky releases behind.
    fn release_all(&mut self) {
        self.held.clear();
        self.unpolled_releases.clear();
    }
}

/// Input state for one window, owned by the game loop.
pub struct InputContext {
    cursor: Box<dyn CursorControl>,
    gamepads: Gamepads,
    clock: Clock,
    keys: ButtonTracker<Key>,
    mouse_buttons: ButtonTracker<MouseButton>,
    cursor_mode: CursorMode,
    cursor_position: Vec2,
    frame_motion: Vec2,
    scroll_offset: Vec2,
    frame_scroll: Vec2,
    scroll_pixels_per_line: f32,
}

impl InputContext {
    /// Create a context for a window and a gamepad driver, applying
    /// `settings`.
    pub fn new(
        cursor: Box<dyn CursorControl>,
        driver: Box<dyn GamepadDriver>,
        settings: &InputSettings,
    ) -> Result<Self, InputError> {
        let mut input = Self {
            cursor,
            gamepads: Gamepads::new(driver),
            clock: Clock::new(),
            keys: ButtonTracker::new(settings.sticky_keys),
            mouse_buttons: ButtonTracker::new(settings.sticky_mouse_buttons),
            cursor_mode: CursorMode::Normal,
            cursor_position: Vec2::ZERO,
            frame_motion: Vec2::ZERO,
            scroll_offset: Vec2::ZERO,
            frame_scroll: Vec2::ZERO,
            scroll_pixels_per_line: settings.scroll_pixels_per_line,
        };
        if settings.cursor_mode != CursorMode::Normal {
            input.set_cursor_mode(settings.cursor_mode)?;
        }
        Ok(input)
    }

    /// A context with no window and no controllers.
    pub fn detached() -> Self {
        Self {
            cursor: Box::new(DetachedCursor::default()),
            gamepads: Gamepads::new(Box::new(NoGamepads)),
            clock: Clock::new(),
            keys: ButtonTracker::new(false),
            mouse_buttons: ButtonTracker::new(false),
            cursor_mode: CursorMode::Normal,
            cursor_position: Vec2::ZERO,
            frame_motion: Vec2::ZERO,
            scroll_offset: Vec2::ZERO,
            frame_scroll: Vec2::ZERO,
            scroll_pixels_per_line: InputSettings::default().scroll_pixels_per_line,
        }
    }

    // Configuration

    pub fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), InputError> {
        self.cursor.set_cursor_mode(mode)?;
        tracing::debug!(?mode, "cursor mode");
        self.cursor_mode = mode;
        Ok(())
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn set_sticky_keys(&mut self, sticky: bool) {
        tracing::debug!(sticky, "sticky keys");
        self.keys.set_sticky(sticky);
    }

    pub fn set_sticky_mouse_buttons(&mut self, sticky: bool) {
        tracing::debug!(sticky, "sticky mouse buttons");
        self.mouse_buttons.set_sticky(sticky);
    }

    // Keyboard

    /// Poll a key. With sticky keys, a press released since the last poll
    /// reads as pressed once.
    pub fn key(&mut self, key: Key) -> ButtonState {
        self.keys.poll(key)
    }

    pub fn is_key_pressed(&mut self, key: Key) -> bool {
        self.key(key).is_pressed()
    }

    // Mouse & cursor

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    pub fn set_cursor_position(&mut self, position: Vec2) -> Result<(), InputError> {
        self.cursor.set_cursor_position(position)?;
        self.cursor_position = position;
        Ok(())
    }

    pub fn mouse_button(&mut self, button: MouseButton) -> ButtonState {
        self.mouse_buttons.poll(button)
    }

    /// Sum of raw mouse motion since the last [`InputContext::end_frame`].
    pub fn frame_motion(&self) -> Vec2 {
        self.frame_motion
    }

    /// Offset of the most recent scroll event, in lines. Not reset between
    /// frames.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    /// Sum of scroll offsets since the last [`InputContext::end_frame`].
    pub fn frame_scroll(&self) -> Vec2 {
        self.frame_scroll
    }

    // Time

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn set_time(&mut self, seconds: f64) -> Result<(), InputError> {
        self.clock.set_time(seconds)?;
        tracing::debug!(seconds, "clock rebased");
        Ok(())
    }

    // Gamepads

    /// Poll every gamepad slot. Call once per frame before gamepad queries.
    pub fn update_gamepads(&mut self) {
        self.gamepads.update();
    }

    /// Poll one slot. Out-of-range slots are never present.
    pub fn is_gamepad_present(&mut self, slot: usize) -> bool {
        self.gamepads.is_present(slot)
    }

    pub fn gamepad_axes(&self, slot: usize) -> GamepadAxes {
        self.gamepads.axes(slot)
    }

    pub fn gamepad_buttons(&self, slot: usize) -> GamepadButtons {
        self.gamepads.buttons(slot)
    }

    pub fn gamepad_name(&self, slot: usize) -> Option<String> {
        self.gamepads.name(slot)
    }

    pub fn gamepads(&self) -> &Gamepads {
        &self.gamepads
    }

    // Event intake

    pub fn on_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => self.keys.press(key),
            ButtonState::Released => self.keys.release(key),
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => self.mouse_buttons.press(button),
            ButtonState::Released => self.mouse_buttons.release(button),
        }
    }

    /// Absolute cursor position from the window. Ignored while the cursor is
    /// disabled, where the position is driven by [`InputContext::on_mouse_motion`].
    pub fn on_cursor_moved(&mut self, position: Vec2) {
        if self.cursor_mode != CursorMode::Disabled {
            self.cursor_position = position;
        }
    }

    /// Raw relative mouse motion from the device.
    ///
    /// While the cursor is disabled it moves a virtual cursor without bounds,
    /// so mouse-look keeps working when the OS cursor is locked or confined.
    pub fn on_mouse_motion(&mut self, delta: Vec2) {
        self.frame_motion += delta;
        if self.cursor_mode == CursorMode::Disabled {
            self.cursor_position += delta;
        }
    }

    /// Record a scroll event in lines.
    pub fn on_scroll(&mut self, offset: Vec2) {
        self.scroll_offset = offset;
        self.frame_scroll += offset;
    }

    /// Record a scroll event in pixels.
    pub fn on_scroll_pixels(&mut self, pixels: Vec2) {
        self.on_scroll(pixels / self.scroll_pixels_per_line);
    }

    /// Losing focus releases everything that is held.
    pub fn on_focus_changed(&mut self, focused: bool) {
        if !focused {
            self.keys.release_all();
            self.mouse_buttons.release_all();
        }
    }

    /// Route a winit device event. Returns whether it was used.
    #[cfg(feature = "window")]
    pub fn handle_device_event(&mut self, event: &winit::event::DeviceEvent) -> bool {
        match event {
            winit::event::DeviceEvent::MouseMotion { delta } => {
                self.on_mouse_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
                true
            }
            _ => false,
        }
    }

    /// Route a winit window event. Returns whether it was an input event.
    #[cfg(feature = "window")]
    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

        let state = |s: &ElementState| ButtonState::from(s.is_pressed());

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return true;
                }
                if let Some(key) = Key::from_winit(event.physical_key) {
                    self.on_key(key, state(&event.state));
                }
            }
            WindowEvent::MouseInput { state: s, button, .. } => {
                self.on_mouse_button((*button).into(), state(s));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(x, y) => self.on_scroll(Vec2::new(*x, *y)),
                MouseScrollDelta::PixelDelta(pos) => {
                    self.on_scroll_pixels(Vec2::new(pos.x as f32, pos.y as f32))
                }
            },
            WindowEvent::Focused(focused) => self.on_focus_changed(*focused),
            _ => return false,
        }
        true
    }

    /// Close the frame: clears the per-frame scroll and motion sums.
    pub fn end_frame(&mut self) {
        self.frame_scroll = Vec2::ZERO;
        self.frame_motion = Vec2::ZERO;
    }
}

impl std::fmt::Debug for InputContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputContext")
            .field("cursor_mode", &self.cursor_mode)
            .field("cursor_position", &self.cursor_position)
            .field("scroll_offset", &self.scroll_offset)
            .field("gamepads", &self.gamepads)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Cursor double that shares its log with the test.
    #[derive(Default, Clone)]
    struct RecordingCursor {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl CursorControl for RecordingCursor {
        fn set_cursor_mode(&mut self, mode: CursorMode) -> Result<(), InputError> {
            self.log.borrow_mut().push(format!("mode {mode:?}"));
            Ok(())
        }

        fn set_cursor_position(&mut self, position: Vec2) -> Result<(), InputError> {
            self.log
                .borrow_mut()
                .push(format!("warp {} {}", position.x, position.y));
            Ok(())
        }
    }

    fn context_with(settings: &InputSettings) -> (InputContext, RecordingCursor, VirtualGamepads) {
        let cursor = RecordingCursor::default();
        let pads = VirtualGamepads::new();
        let input = InputContext::new(
            Box::new(cursor.clone()),
            Box::new(pads.clone()),
            settings,
        )
        .unwrap();
        (input, cursor, pads)
    }

    #[test]
    fn test_scroll_offset_persists() {
        let mut input = InputContext::detached();
        assert_eq!(input.scroll_offset(), Vec2::ZERO);

        input.on_scroll(Vec2::new(0.0, 3.5));
        for _ in 0..3 {
            assert_eq!(input.scroll_offset(), Vec2::new(0.0, 3.5));
            input.end_frame();
        }

        input.on_scroll(Vec2::new(-1.0, 0.0));
        assert_eq!(input.scroll_offset(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_frame_scroll_accumulates_and_resets() {
        let mut input = InputContext::detached();
        input.on_scroll(Vec2::new(0.0, 1.0));
        input.on_scroll(Vec2::new(0.0, 2.0));
        input.on_scroll_pixels(Vec2::new(40.0, 0.0));
        assert_eq!(input.frame_scroll(), Vec2::new(2.0, 3.0));
        assert_eq!(input.scroll_offset(), Vec2::new(2.0, 0.0));

        input.end_frame();
        assert_eq!(input.frame_scroll(), Vec2::ZERO);
        assert_eq!(input.scroll_offset(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_key_state_without_sticky() {
        let mut input = InputContext::detached();
        assert_eq!(input.key(Key::W), ButtonState::Released);

        input.on_key(Key::W, ButtonState::Pressed);
        assert_eq!(input.key(Key::W), ButtonState::Pressed);
        assert_eq!(input.key(Key::W), ButtonState::Pressed);

        input.on_key(Key::W, ButtonState::Released);
        assert_eq!(input.key(Key::W), ButtonState::Released);

        // Tap between polls is lost.
        input.on_key(Key::Space, ButtonState::Pressed);
        input.on_key(Key::Space, ButtonState::Released);
        assert!(!input.is_key_pressed(Key::Space));
    }

    #[test]
    fn test_sticky_keys_report_tap_once() {
        let (mut input, _, _) = context_with(&InputSettings::new().sticky_keys(true));

        input.on_key(Key::Space, ButtonState::Pressed);
        input.on_key(Key::Space, ButtonState::Released);
        assert_eq!(input.key(Key::Space), ButtonState::Pressed);
        assert_eq!(input.key(Key::Space), ButtonState::Released);

        // Disabling drops pending releases.
        input.on_key(Key::E, ButtonState::Pressed);
        input.on_key(Key::E, ButtonState::Released);
        input.set_sticky_keys(false);
        assert_eq!(input.key(Key::E), ButtonState::Released);
    }

    #[test]
    fn test_sticky_mouse_buttons() {
        let mut input = InputContext::detached();
        input.set_sticky_mouse_buttons(true);

        input.on_mouse_button(MouseButton::Left, ButtonState::Pressed);
        input.on_mouse_button(MouseButton::Left, ButtonState::Released);
        assert!(input.mouse_button(MouseButton::Left).is_pressed());
        assert!(!input.mouse_button(MouseButton::Left).is_pressed());

        // Keys are unaffected.
        input.on_key(Key::Q, ButtonState::Pressed);
        input.on_key(Key::Q, ButtonState::Released);
        assert_eq!(input.key(Key::Q), ButtonState::Released);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = InputContext::detached();
        input.set_sticky_keys(true);
        input.on_key(Key::A, ButtonState::Released);
        assert_eq!(input.key(Key::A), ButtonState::Released);
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = InputContext::detached();
        input.on_key(Key::W, ButtonState::Pressed);
        input.on_mouse_button(MouseButton::Right, ButtonState::Pressed);

        input.on_focus_changed(false);
        assert_eq!(input.key(Key::W), ButtonState::Released);
        assert_eq!(input.mouse_button(MouseButton::Right), ButtonState::Released);
    }

    #[test]
    fn test_focus_loss_leaves_no_sticky_echo() {
        let (mut input, _, _) = context_with(
            &InputSettings::new()
                .sticky_keys(true)
                .sticky_mouse_buttons(true),
        );
        input.on_key(Key::W, ButtonState::Pressed);
        input.on_mouse_button(MouseButton::Left, ButtonState::Pressed);

        input.on_focus_changed(false);
        assert_eq!(input.key(Key::W), ButtonState::Released);
        assert_eq!(input.mouse_button(MouseButton::Left), ButtonState::Released);

        // Taps after refocus are still sticky.
        input.on_focus_changed(true);
        input.on_key(Key::W, ButtonState::Pressed);
        input.on_key(Key::W, ButtonState::Released);
        assert_eq!(input.key(Key::W), ButtonState::Pressed);
    }

    #[test]
    fn test_disabled_cursor_follows_raw_motion_without_bounds() {
        let mut input = InputContext::detached();
        input.on_cursor_moved(Vec2::new(100.0, 100.0));
        input.set_cursor_mode(CursorMode::Disabled).unwrap();

        // A confined OS cursor keeps reporting the window edge.
        for _ in 0..50 {
            input.on_mouse_motion(Vec2::new(40.0, -10.0));
            input.on_cursor_moved(Vec2::new(1279.0, 0.0));
        }
        assert_eq!(input.cursor_position(), Vec2::new(2100.0, -400.0));
        assert!(input.cursor_position().x > 1280.0);
        assert_eq!(input.frame_motion(), Vec2::new(2000.0, -500.0));

        input.end_frame();
        assert_eq!(input.frame_motion(), Vec2::ZERO);
        assert_eq!(input.cursor_position(), Vec2::new(2100.0, -400.0));
    }

    #[test]
    fn test_raw_motion_does_not_move_normal_cursor() {
        let mut input = InputContext::detached();
        input.on_cursor_moved(Vec2::new(5.0, 5.0));
        input.on_mouse_motion(Vec2::new(3.0, 4.0));
        assert_eq!(input.cursor_position(), Vec2::new(5.0, 5.0));
        assert_eq!(input.frame_motion(), Vec2::new(3.0, 4.0));

        input.set_cursor_mode(CursorMode::Normal).unwrap();
        input.on_cursor_moved(Vec2::new(6.0, 7.0));
        assert_eq!(input.cursor_position(), Vec2::new(6.0, 7.0));
    }

    #[test]
    fn test_cursor_requests_reach_window() {
        let (mut input, cursor, _) =
            context_with(&InputSettings::new().cursor_mode(CursorMode::Disabled));
        assert_eq!(input.cursor_mode(), CursorMode::Disabled);

        input.set_cursor_mode(CursorMode::Hidden).unwrap();
        input.set_cursor_position(Vec2::new(10.0, 20.0)).unwrap();
        assert_eq!(input.cursor_position(), Vec2::new(10.0, 20.0));

        input.on_cursor_moved(Vec2::new(11.5, 19.0));
        assert_eq!(input.cursor_position(), Vec2::new(11.5, 19.0));

        assert_eq!(
            *cursor.log.borrow(),
            ["mode Disabled", "mode Hidden", "warp 10 20"]
        );
    }

    #[test]
    fn test_normal_cursor_setting_makes_no_request() {
        let (_input, cursor, _) = context_with(&InputSettings::default());
        assert!(cursor.log.borrow().is_empty());
    }

    #[test]
    fn test_time() {
        let mut input = InputContext::detached();
        input.set_time(5.0).unwrap();
        let t = input.time();
        assert!((5.0..6.0).contains(&t));
        assert!(input.set_time(-0.5).is_err());
    }

    #[test]
    fn test_gamepad_queries() {
        let (mut input, _, pads) = context_with(&InputSettings::default());
        pads.connect(0, "Test Pad");
        pads.set_state(
            0,
            RawGamepadState {
                buttons: GamepadButton::A.mask() | GamepadButton::DpadUp.mask(),
                left_trigger: 255,
                thumb_ly: 32767,
                ..Default::default()
            },
        );

        input.update_gamepads();
        assert!(input.gamepads().was_present(0));
        assert!(input.is_gamepad_present(0));
        assert!(!input.is_gamepad_present(1));

        let axes = input.gamepad_axes(0);
        assert!((axes.left_trigger - 1.0).abs() < 1e-6);
        assert!((axes.left_thumbstick.y - 1.0).abs() < 1e-6);

        let buttons = input.gamepad_buttons(0);
        for (button, pressed) in buttons.iter() {
            let expected = matches!(button, GamepadButton::A | GamepadButton::DpadUp);
            assert_eq!(pressed, expected, "{button:?}");
        }

        assert_eq!(input.gamepad_name(0).as_deref(), Some("Test Pad"));

        for slot in [MAX_GAMEPADS - 1, MAX_GAMEPADS, MAX_GAMEPADS + 1] {
            assert!(!input.is_gamepad_present(slot));
        }
    }

    #[cfg(feature = "window")]
    #[test]
    fn test_window_event_routing() {
        use winit::dpi::PhysicalPosition;
        use winit::event::{
            DeviceEvent, DeviceId, ElementState, MouseScrollDelta, TouchPhase, WindowEvent,
        };

        let device_id = unsafe { DeviceId::dummy() };
        let mut input = InputContext::detached();

        assert!(input.handle_window_event(&WindowEvent::MouseWheel {
            device_id,
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 60.0)),
            phase: TouchPhase::Moved,
        }));
        assert_eq!(input.scroll_offset(), Vec2::new(0.0, 3.0));

        input.handle_window_event(&WindowEvent::MouseWheel {
            device_id,
            delta: MouseScrollDelta::LineDelta(-1.0, 0.5),
            phase: TouchPhase::Moved,
        });
        assert_eq!(input.scroll_offset(), Vec2::new(-1.0, 0.5));
        assert_eq!(input.frame_scroll(), Vec2::new(-1.0, 3.5));

        input.handle_window_event(&WindowEvent::CursorMoved {
            device_id,
            position: PhysicalPosition::new(12.0, 34.0),
        });
        assert_eq!(input.cursor_position(), Vec2::new(12.0, 34.0));

        input.handle_window_event(&WindowEvent::MouseInput {
            device_id,
            state: ElementState::Pressed,
            button: winit::event::MouseButton::Right,
        });
        assert!(input.mouse_button(MouseButton::Right).is_pressed());

        assert!(input.handle_window_event(&WindowEvent::Focused(false)));
        assert!(!input.mouse_button(MouseButton::Right).is_pressed());

        assert!(!input.handle_window_event(&WindowEvent::CloseRequested));

        assert!(input.handle_device_event(&DeviceEvent::MouseMotion { delta: (2.0, -1.0) }));
        assert_eq!(input.frame_motion(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_presence_check_refreshes_state() {
        let (mut input, _, pads) = context_with(&InputSettings::default());
        pads.connect(2, "Late Pad");
        pads.set_state(
            2,
            RawGamepadState {
                right_trigger: 255,
                ..Default::default()
            },
        );

        assert_eq!(input.gamepad_axes(2).right_trigger, 0.0);
        assert!(input.is_gamepad_present(2));
        assert!((input.gamepad_axes(2).right_trigger - 1.0).abs() < 1e-6);
    }
}
