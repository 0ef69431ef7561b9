//! Gamepad polling
//!
//! A [`GamepadDriver`] reports a raw XInput-style state blob per slot. The
//! [`Gamepads`] cache keeps the last sample of every slot and decodes axes and
//! buttons from it on demand.

use super::InputError;
use glam::Vec2;
use std::cell::RefCell;
use std::ops::Index;
use std::rc::Rc;

/// Number of supported gamepad slots.
pub const MAX_GAMEPADS: usize = 4;

const TRIGGER_MAX: f32 = 255.0;
const THUMB_MAX: f32 = 32767.0;

/// Raw controller sample as delivered by the driver.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawGamepadState {
    /// Bitmask of [`GamepadButton::mask`] values.
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl RawGamepadState {
    /// Size of the blob in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Decode a native-endian blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InputError> {
        bytemuck::try_pod_read_unaligned(bytes).map_err(|_| InputError::GamepadBlob {
            expected: Self::SIZE,
            got: bytes.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Set or clear a button bit.
    pub fn with_button(mut self, button: GamepadButton, pressed: bool) -> Self {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
        self
    }
}

/// Buttons of an Xbox-layout controller, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Start,
    Back,
    LeftThumb,
    RightThumb,
    LeftShoulder,
    RightShoulder,
    A,
    B,
    X,
    Y,
}

impl GamepadButton {
    pub const COUNT: usize = 14;

    pub const ALL: [GamepadButton; Self::COUNT] = [
        GamepadButton::DpadUp,
        GamepadButton::DpadDown,
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::Start,
        GamepadButton::Back,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
    ];

    /// Bit of this button in [`RawGamepadState::buttons`].
    pub const fn mask(self) -> u16 {
        match self {
            GamepadButton::DpadUp => 0x0001,
            GamepadButton::DpadDown => 0x0002,
            GamepadButton::DpadLeft => 0x0004,
            GamepadButton::DpadRight => 0x0008,
            GamepadButton::Start => 0x0010,
            GamepadButton::Back => 0x0020,
            GamepadButton::LeftThumb => 0x0040,
            GamepadButton::RightThumb => 0x0080,
            GamepadButton::LeftShoulder => 0x0100,
            GamepadButton::RightShoulder => 0x0200,
            GamepadButton::A => 0x1000,
            GamepadButton::B => 0x2000,
            GamepadButton::X => 0x4000,
            GamepadButton::Y => 0x8000,
        }
    }
}

/// Normalized triggers (0..1) and thumbsticks (about -1..1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadAxes {
    pub left_trigger: f32,
    pub right_trigger: f32,
    pub left_thumbstick: Vec2,
    pub right_thumbstick: Vec2,
}

impl GamepadAxes {
    pub fn from_raw(raw: &RawGamepadState) -> Self {
        Self {
            left_trigger: raw.left_trigger as f32 / TRIGGER_MAX,
            right_trigger: raw.right_trigger as f32 / TRIGGER_MAX,
            left_thumbstick: Vec2::new(
                raw.thumb_lx as f32 / THUMB_MAX,
                raw.thumb_ly as f32 / THUMB_MAX,
            ),
            right_thumbstick: Vec2::new(
                raw.thumb_rx as f32 / THUMB_MAX,
                raw.thumb_ry as f32 / THUMB_MAX,
            ),
        }
    }
}

/// Pressed flags indexed by [`GamepadButton`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadButtons([bool; GamepadButton::COUNT]);

impl GamepadButtons {
    pub fn from_raw(raw: &RawGamepadState) -> Self {
        let mut pressed = [false; GamepadButton::COUNT];
        for (slot, button) in pressed.iter_mut().zip(GamepadButton::ALL) {
            *slot = raw.buttons & button.mask() != 0;
        }
        Self(pressed)
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self[button]
    }

    /// Buttons in reporting order with their flags.
    pub fn iter(&self) -> impl Iterator<Item = (GamepadButton, bool)> + '_ {
        GamepadButton::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl Index<GamepadButton> for GamepadButtons {
    type Output = bool;

    fn index(&self, button: GamepadButton) -> &bool {
        &self.0[button as usize]
    }
}

/// Source of gamepad samples.
pub trait GamepadDriver {
    /// Sample a slot. `None` when nothing is connected there.
    fn poll(&mut self, slot: usize) -> Option<RawGamepadState>;

    /// Display name of the device in a slot.
    fn name(&self, slot: usize) -> Option<String>;
}

/// Driver with no controllers attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGamepads;

impl GamepadDriver for NoGamepads {
    fn poll(&mut self, _slot: usize) -> Option<RawGamepadState> {
        None
    }

    fn name(&self, _slot: usize) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
struct VirtualPad {
    name: String,
    state: RawGamepadState,
}

/// In-memory gamepads fed by the host.
///
/// Clones share the same slots, so one handle can go into an
/// [`InputContext`](super::InputContext) while another keeps feeding it
/// (input replay, tests, bridging another controller backend).
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepads {
    slots: Rc<RefCell<[Option<VirtualPad>; MAX_GAMEPADS]>>,
}

impl VirtualGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug a device into a slot with a neutral state. Returns false for an
    /// out-of-range slot.
    pub fn connect(&self, slot: usize, name: impl Into<String>) -> bool {
        let mut slots = self.slots.borrow_mut();
        let Some(entry) = slots.get_mut(slot) else {
            return false;
        };
        *entry = Some(VirtualPad {
            name: name.into(),
            state: RawGamepadState::default(),
        });
        true
    }

    pub fn disconnect(&self, slot: usize) {
        if let Some(entry) = self.slots.borrow_mut().get_mut(slot) {
            *entry = None;
        }
    }

    /// Replace the state of a connected slot. Returns false if nothing is
    /// connected there.
    pub fn set_state(&self, slot: usize, state: RawGamepadState) -> bool {
        match self.slots.borrow_mut().get_mut(slot) {
            Some(Some(pad)) => {
                pad.state = state;
                true
            }
            _ => false,
        }
    }
}

impl GamepadDriver for VirtualGamepads {
    fn poll(&mut self, slot: usize) -> Option<RawGamepadState> {
        self.slots.borrow().get(slot)?.as_ref().map(|pad| pad.state)
    }

    fn name(&self, slot: usize) -> Option<String> {
        self.slots.borrow().get(slot)?.as_ref().map(|pad| pad.name.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    state: RawGamepadState,
    connected: bool,
}

/// Last-sampled state of every gamepad slot.
pub struct Gamepads {
    driver: Box<dyn GamepadDriver>,
    slots: [Slot; MAX_GAMEPADS],
}

impl Gamepads {
    pub fn new(driver: Box<dyn GamepadDriver>) -> Self {
        Self {
            driver,
            slots: [Slot::default(); MAX_GAMEPADS],
        }
    }

    /// Poll every slot.
    pub fn update(&mut self) {
        for slot in 0..MAX_GAMEPADS {
            self.is_present(slot);
        }
    }

    /// Poll one slot and report whether a device answered.
    ///
    /// Out-of-range slots are never present.
    pub fn is_present(&mut self, slot: usize) -> bool {
        let Some(cached) = self.slots.get_mut(slot) else {
            return false;
        };

        let sample = self.driver.poll(slot);
        let connected = sample.is_some();
        if connected != cached.connected {
            if connected {
                tracing::info!(slot, name = ?self.driver.name(slot), "gamepad connected");
            } else {
                tracing::info!(slot, "gamepad disconnected");
            }
        }

        *cached = Slot {
            state: sample.unwrap_or_default(),
            connected,
        };
        connected
    }

    /// Whether the slot answered on its last poll. Does not poll.
    pub fn was_present(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| s.connected)
    }

    /// Last raw sample. Zeroed for disconnected or out-of-range slots.
    pub fn raw(&self, slot: usize) -> RawGamepadState {
        self.slots.get(slot).map(|s| s.state).unwrap_or_default()
    }

    pub fn axes(&self, slot: usize) -> GamepadAxes {
        GamepadAxes::from_raw(&self.raw(slot))
    }

    pub fn buttons(&self, slot: usize) -> GamepadButtons {
        GamepadButtons::from_raw(&self.raw(slot))
    }

    pub fn name(&self, slot: usize) -> Option<String> {
        if slot >= MAX_GAMEPADS {
            return None;
        }
        self.driver.name(slot)
    }
}

impl std::fmt::Debug for Gamepads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gamepads")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_axis_normalization() {
        let raw = RawGamepadState {
            left_trigger: 255,
            right_trigger: 0,
            thumb_lx: 32767,
            thumb_ly: 0,
            thumb_rx: -32767,
            thumb_ry: 16384,
            ..Default::default()
        };
        let axes = GamepadAxes::from_raw(&raw);
        assert!((axes.left_trigger - 1.0).abs() < EPS);
        assert_eq!(axes.right_trigger, 0.0);
        assert!((axes.left_thumbstick.x - 1.0).abs() < EPS);
        assert_eq!(axes.left_thumbstick.y, 0.0);
        assert!((axes.right_thumbstick.x + 1.0).abs() < EPS);
        assert!((axes.right_thumbstick.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_most_negative_stick_slightly_exceeds_one() {
        let raw = RawGamepadState {
            thumb_lx: i16::MIN,
            ..Default::default()
        };
        let x = GamepadAxes::from_raw(&raw).left_thumbstick.x;
        assert!(x < -1.0 && x > -1.0001);
    }

    #[test]
    fn test_button_unpacking() {
        let raw = RawGamepadState {
            buttons: GamepadButton::A.mask() | GamepadButton::DpadUp.mask(),
            ..Default::default()
        };
        let buttons = GamepadButtons::from_raw(&raw);

        let pressed: Vec<_> = buttons.iter().filter(|(_, p)| *p).map(|(b, _)| b).collect();
        assert_eq!(pressed, [GamepadButton::DpadUp, GamepadButton::A]);
        assert!(buttons[GamepadButton::A]);
        assert!(!buttons.is_pressed(GamepadButton::B));
        assert_eq!(buttons.as_slice().iter().filter(|p| **p).count(), 2);
    }

    #[test]
    fn test_masks_are_distinct_and_indices_match() {
        let mut seen = 0u16;
        for (i, button) in GamepadButton::ALL.into_iter().enumerate() {
            assert_eq!(button as usize, i);
            assert_eq!(seen & button.mask(), 0);
            seen |= button.mask();
        }
        let all = GamepadButtons::from_raw(&RawGamepadState {
            buttons: seen,
            ..Default::default()
        });
        assert!(all.iter().all(|(_, p)| p));
    }

    #[test]
    fn test_blob_decoding() {
        let state = RawGamepadState::default()
            .with_button(GamepadButton::Y, true)
            .with_button(GamepadButton::Start, true)
            .with_button(GamepadButton::Start, false);
        assert_eq!(RawGamepadState::SIZE, 12);
        assert_eq!(RawGamepadState::from_bytes(state.as_bytes()).unwrap(), state);

        assert!(matches!(
            RawGamepadState::from_bytes(&[0u8; 5]),
            Err(InputError::GamepadBlob {
                expected: 12,
                got: 5
            })
        ));
    }

    #[test]
    fn test_out_of_range_slots_are_absent() {
        let pads = VirtualGamepads::new();
        for slot in 0..MAX_GAMEPADS {
            assert!(pads.connect(slot, format!("pad {slot}")));
        }
        assert!(!pads.connect(MAX_GAMEPADS, "nope"));

        let mut gamepads = Gamepads::new(Box::new(pads));
        assert!(gamepads.is_present(MAX_GAMEPADS - 1));
        assert!(!gamepads.is_present(MAX_GAMEPADS));
        assert!(!gamepads.is_present(MAX_GAMEPADS + 1));
        assert!(!gamepads.is_present(usize::MAX));

        assert_eq!(gamepads.axes(MAX_GAMEPADS), GamepadAxes::default());
        assert_eq!(gamepads.buttons(MAX_GAMEPADS + 1), GamepadButtons::default());
        assert_eq!(gamepads.name(MAX_GAMEPADS), None);
    }

    #[test]
    fn test_update_refreshes_all_slots() {
        let pads = VirtualGamepads::new();
        let mut gamepads = Gamepads::new(Box::new(pads.clone()));

        pads.connect(1, "Pad One");
        pads.set_state(
            1,
            RawGamepadState {
                right_trigger: 255,
                ..Default::default()
            },
        );

        // Nothing sampled yet.
        assert!(!gamepads.was_present(1));
        assert_eq!(gamepads.axes(1).right_trigger, 0.0);

        gamepads.update();
        assert!(gamepads.was_present(1));
        assert!(!gamepads.was_present(0));
        assert!((gamepads.axes(1).right_trigger - 1.0).abs() < EPS);
        assert_eq!(gamepads.name(1).as_deref(), Some("Pad One"));

        pads.disconnect(1);
        gamepads.update();
        assert!(!gamepads.was_present(1));
        assert_eq!(gamepads.raw(1), RawGamepadState::default());
        assert_eq!(gamepads.name(1), None);
    }

    #[test]
    fn test_set_state_requires_connection() {
        let pads = VirtualGamepads::new();
        assert!(!pads.set_state(0, RawGamepadState::default()));
        pads.connect(0, "Pad");
        assert!(pads.set_state(0, RawGamepadState::default()));
        assert!(!pads.set_state(MAX_GAMEPADS, RawGamepadState::default()));
    }

    #[test]
    fn test_no_gamepads() {
        let mut gamepads = Gamepads::new(Box::new(NoGamepads));
        gamepads.update();
        assert!((0..MAX_GAMEPADS).all(|slot| !gamepads.is_present(slot)));
        assert_eq!(gamepads.name(0), None);
    }
}
