use glam::Vec3;
use lantern::input::{
    ButtonState, CursorMode, GamepadButton, GamepadDriver, InputSettings, Key, MouseButton,
    RawGamepadState, VirtualGamepads,
};
use lantern::light::{Attenuation, BaseLight, Color, DirectionalLight, Light, PointLight, SpotLight};
use lantern::{Frame, FrameOutput, Window, WindowSettings};

fn init_telemetry() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

fn scene_lights() -> Vec<Light> {
    let mut lights: Vec<Light> = vec![
        DirectionalLight::white(0.8, Vec3::new(-0.3, -1.0, -0.5)).into(),
        PointLight::white(1.0, Vec3::new(0.0, 2.0, 0.0)).into(),
        PointLight::new(
            BaseLight::new(Color::new(255, 140, 40), 2.0),
            Vec3::new(4.0, 1.0, -3.0),
            Attenuation::new(1.0, 0.7, 1.8),
        )
        .into(),
        SpotLight::white(0.5, Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y)
            .with_cone_degrees(25.0)
            .into(),
    ];

    for (i, light) in lights.iter_mut().enumerate() {
        match light.update_range() {
            Ok(Some(range)) => tracing::info!(i, kind = ?light.light_type(), range, "light"),
            Ok(None) => tracing::info!(i, kind = ?light.light_type(), "light (unbounded)"),
            Err(e) => tracing::warn!(i, "light range: {e}"),
        }
    }
    lights
}

/// Keyboard-emulated controller in slot 0.
const PAD_KEYS: [(Key, GamepadButton); 6] = [
    (Key::Up, GamepadButton::DpadUp),
    (Key::Down, GamepadButton::DpadDown),
    (Key::Left, GamepadButton::DpadLeft),
    (Key::Right, GamepadButton::DpadRight),
    (Key::J, GamepadButton::A),
    (Key::K, GamepadButton::B),
];

struct Demo {
    pads: VirtualGamepads,
    last_pad: RawGamepadState,
    capture_held: bool,
    next_report: f64,
}

impl Demo {
    fn frame(&mut self, frame: &mut Frame<'_>) -> FrameOutput {
        let input = &mut *frame.input;

        if input.key(Key::Escape).is_pressed() {
            return FrameOutput::exit();
        }

        // Toggle mouse capture on Tab press.
        let capture = input.key(Key::Tab).is_pressed();
        if capture && !self.capture_held {
            let mode = match input.cursor_mode() {
                CursorMode::Disabled => CursorMode::Normal,
                _ => CursorMode::Disabled,
            };
            if let Err(e) = input.set_cursor_mode(mode) {
                tracing::warn!("{e}");
            }
        }
        self.capture_held = capture;

        if input.mouse_button(MouseButton::Left) == ButtonState::Pressed {
            tracing::debug!(position = ?input.cursor_position(), "click");
        }

        let motion = input.frame_motion();
        if input.cursor_mode() == CursorMode::Disabled && motion != glam::Vec2::ZERO {
            tracing::debug!(?motion, look = ?input.cursor_position(), "mouse look");
        }

        let scroll = input.frame_scroll();
        if scroll != glam::Vec2::ZERO {
            tracing::info!(?scroll, last = ?input.scroll_offset(), "scroll");
        }

        // Feed the virtual pad for the next poll.
        let mut pad = RawGamepadState::default();
        for (key, button) in PAD_KEYS {
            pad = pad.with_button(button, input.key(key).is_pressed());
        }
        if input.key(Key::LeftShift).is_pressed() {
            pad.left_trigger = u8::MAX;
        }
        self.pads.set_state(0, pad);

        let raw = input.gamepads().raw(0);
        if raw != self.last_pad {
            let pressed: Vec<_> = input
                .gamepad_buttons(0)
                .iter()
                .filter(|(_, p)| *p)
                .map(|(b, _)| b)
                .collect();
            tracing::info!(?pressed, axes = ?input.gamepad_axes(0), "pad 0");
            self.last_pad = raw;
        }

        if frame.elapsed_time >= self.next_report {
            self.next_report = frame.elapsed_time + 5.0;
            tracing::info!(
                t = frame.elapsed_time,
                dt = frame.delta_time,
                size = ?frame.size,
                pad = ?frame.input.gamepad_name(0),
                "status"
            );
        }

        FrameOutput::new()
    }
}

fn main() -> anyhow::Result<()> {
    init_telemetry();

    let lights = scene_lights();
    tracing::info!(count = lights.len(), "scene lights ready");

    let pads = VirtualGamepads::new();
    pads.connect(0, "Keyboard Pad");

    let settings = WindowSettings::new()
        .title("lantern input")
        .size(960, 540)
        .input(InputSettings::new().sticky_keys(true));

    let demo = Demo {
        pads: pads.clone(),
        last_pad: RawGamepadState::default(),
        capture_held: false,
        next_report: 0.0,
    };

    // Real controllers replace the keyboard pad when built with gilrs.
    #[cfg(feature = "gilrs")]
    let driver: Box<dyn GamepadDriver> = Box::new(lantern::HardwareGamepads::new()?);
    #[cfg(not(feature = "gilrs"))]
    let driver: Box<dyn GamepadDriver> = Box::new(pads);

    Window::new(settings)?
        .with_gamepad_driver(driver)
        .run(demo, |demo, frame| demo.frame(frame))
}
