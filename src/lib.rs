//! Lantern
//!
//! Lighting data and poll-driven input for a real-time 3D engine.
//!
//! # Architecture
//!
//! 1. **light** - Directional, point and spot lights, effective light range,
//!    GPU uniform layouts
//! 2. **input** - `InputContext`: keys, mouse, scroll, clock and gamepads
//! 3. **window** - Single-window frame loop with winit (feature = "window")
//!
//! Feature `gilrs` adds `HardwareGamepads`, a gamepad driver for real
//! controllers.

pub mod input;
pub mod light;

#[cfg(feature = "window")]
pub mod window;

pub use light::{
    compute_range, Attenuation, BaseLight, Color, DirectionalLight, Light, LightError, LightType,
    LightUniforms, PointLight, SpotLight, SpotLightUniform,
};

pub use input::{
    ButtonState, Clock, CursorControl, CursorMode, DetachedCursor, GamepadAxes, GamepadButton,
    GamepadButtons, GamepadDriver, InputContext, InputError, InputSettings, Key, MouseButton,
    NoGamepads, RawGamepadState, VirtualGamepads, MAX_GAMEPADS,
};

#[cfg(feature = "gilrs")]
pub use input::HardwareGamepads;

#[cfg(feature = "window")]
pub use window::{Frame, FrameOutput, Window, WindowSettings};

// Re-export glam for convenience
pub use glam;
