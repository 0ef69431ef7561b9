//! Physical controllers through gilrs.
//!
//! gilrs ids are assigned to the [`MAX_GAMEPADS`] slots in connection order;
//! a slot frees up when its controller disconnects.

use super::gamepad::{GamepadButton, GamepadDriver, RawGamepadState, MAX_GAMEPADS};
use super::InputError;
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};

/// Buttons reported in the raw bitmask, by gilrs name.
const BUTTON_MAP: [(Button, GamepadButton); GamepadButton::COUNT] = [
    (Button::DPadUp, GamepadButton::DpadUp),
    (Button::DPadDown, GamepadButton::DpadDown),
    (Button::DPadLeft, GamepadButton::DpadLeft),
    (Button::DPadRight, GamepadButton::DpadRight),
    (Button::Start, GamepadButton::Start),
    (Button::Select, GamepadButton::Back),
    (Button::LeftThumb, GamepadButton::LeftThumb),
    (Button::RightThumb, GamepadButton::RightThumb),
    (Button::LeftTrigger, GamepadButton::LeftShoulder),
    (Button::RightTrigger, GamepadButton::RightShoulder),
    (Button::South, GamepadButton::A),
    (Button::East, GamepadButton::B),
    (Button::West, GamepadButton::X),
    (Button::North, GamepadButton::Y),
];

fn trigger_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn stick_to_i16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Pack a controller sample into the raw blob.
///
/// `pressed` reports digital buttons, `axis` the sticks (-1..1, up positive),
/// `trigger` the analog triggers (0..1).
pub fn raw_state(
    pressed: impl Fn(Button) -> bool,
    axis: impl Fn(Axis) -> f32,
    trigger: impl Fn(Button) -> f32,
) -> RawGamepadState {
    let buttons = BUTTON_MAP
        .iter()
        .filter(|(button, _)| pressed(*button))
        .fold(0u16, |mask, (_, mapped)| mask | mapped.mask());

    RawGamepadState {
        buttons,
        left_trigger: trigger_to_u8(trigger(Button::LeftTrigger2)),
        right_trigger: trigger_to_u8(trigger(Button::RightTrigger2)),
        thumb_lx: stick_to_i16(axis(Axis::LeftStickX)),
        thumb_ly: stick_to_i16(axis(Axis::LeftStickY)),
        thumb_rx: stick_to_i16(axis(Axis::RightStickX)),
        thumb_ry: stick_to_i16(axis(Axis::RightStickY)),
    }
}

/// Driver reading real controllers.
pub struct HardwareGamepads {
    gilrs: Gilrs,
    slots: [Option<GamepadId>; MAX_GAMEPADS],
}

impl HardwareGamepads {
    /// Open the platform gamepad backend.
    ///
    /// Platforms gilrs does not support get a driver that never reports a
    /// controller.
    pub fn new() -> Result<Self, InputError> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                tracing::warn!("gamepads are not supported on this platform");
                dummy
            }
            Err(e) => return Err(InputError::GamepadBackend(e.to_string())),
        };

        let mut driver = Self {
            gilrs,
            slots: [None; MAX_GAMEPADS],
        };
        let connected: Vec<GamepadId> = driver.gilrs.gamepads().map(|(id, _)| id).collect();
        for id in connected {
            driver.assign(id);
        }
        Ok(driver)
    }

    fn assign(&mut self, id: GamepadId) {
        if self.slots.contains(&Some(id)) {
            return;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = Some(id),
            None => tracing::warn!(?id, "all gamepad slots in use, ignoring controller"),
        }
    }

    fn unassign(&mut self, id: GamepadId) {
        for slot in self.slots.iter_mut().filter(|slot| **slot == Some(id)) {
            *slot = None;
        }
    }

    /// Drain pending gilrs events so button and axis state is current.
    fn pump(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::Connected => self.assign(event.id),
                EventType::Disconnected => self.unassign(event.id),
                _ => {}
            }
        }
    }
}

impl GamepadDriver for HardwareGamepads {
    fn poll(&mut self, slot: usize) -> Option<RawGamepadState> {
        self.pump();
        let id = (*self.slots.get(slot)?)?;
        let pad = self.gilrs.connected_gamepad(id)?;

        Some(raw_state(
            |button| pad.is_pressed(button),
            |axis| pad.value(axis),
            |button| pad.button_data(button).map_or(0.0, |data| data.value()),
        ))
    }

    fn name(&self, slot: usize) -> Option<String> {
        let id = (*self.slots.get(slot)?)?;
        self.gilrs
            .connected_gamepad(id)
            .map(|pad| pad.name().to_string())
    }
}
