//! Window management module
//!
//! Hosts the single window over winit and owns its [`InputContext`]: window
//! events are routed into the context, and the frame callback reads it.

pub mod frame;
pub mod settings;

pub use frame::{Frame, FrameOutput};
pub use settings::WindowSettings;

use crate::input::{GamepadDriver, InputContext, NoGamepads, WinitCursor};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// A window driving a poll-style frame loop.
pub struct Window {
    settings: WindowSettings,
    gamepads: Box<dyn GamepadDriver>,
}

impl Window {
    /// Create a new window with the given settings.
    pub fn new(settings: WindowSettings) -> anyhow::Result<Self> {
        Ok(Self {
            settings,
            gamepads: Box::new(NoGamepads),
        })
    }

    /// Use a gamepad driver for the input context.
    pub fn with_gamepad_driver(mut self, driver: Box<dyn GamepadDriver>) -> Self {
        self.gamepads = driver;
        self
    }

    /// Run the frame loop with a callback.
    ///
    /// Each frame gamepads are polled, the callback runs with a [`Frame`],
    /// then the input context's frame is closed.
    pub fn run<F, S>(self, state_init: S, callback: F) -> anyhow::Result<()>
    where
        F: FnMut(&mut S, &mut Frame<'_>) -> FrameOutput + 'static,
        S: 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            settings: self.settings,
            gamepads: Some(self.gamepads),
            state: state_init,
            callback,
            active: None,
            failure: None,
            last_frame_time: Instant::now(),
        };

        event_loop.run_app(&mut app)?;

        match app.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct Active {
    window: Arc<winit::window::Window>,
    input: InputContext,
}

struct App<S, F> {
    settings: WindowSettings,
    gamepads: Option<Box<dyn GamepadDriver>>,
    state: S,
    callback: F,
    active: Option<Active>,
    failure: Option<anyhow::Error>,
    last_frame_time: Instant,
}

impl<S, F> App<S, F> {
    fn create(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Active> {
        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.size.0,
                self.settings.size.1,
            ))
            .with_resizable(self.settings.resizable)
            .with_maximized(self.settings.maximized);

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let driver = self
            .gamepads
            .take()
            .unwrap_or_else(|| Box::new(NoGamepads));
        let input = InputContext::new(
            Box::new(WinitCursor::new(window.clone())),
            driver,
            &self.settings.input,
        )?;

        tracing::info!(title = %self.settings.title, "window created");
        Ok(Active { window, input })
    }
}

impl<S, F> ApplicationHandler for App<S, F>
where
    F: FnMut(&mut S, &mut Frame<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.active.is_some() {
            return;
        }

        match self.create(event_loop) {
            Ok(active) => {
                self.active = Some(active);
                self.last_frame_time = Instant::now();
            }
            Err(e) => {
                tracing::error!("Failed to create window: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(active) = &mut self.active else {
            return;
        };

        if active.input.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = (now - self.last_frame_time).as_secs_f64();
                self.last_frame_time = now;

                active.input.update_gamepads();

                let size = active.window.inner_size();
                let mut frame = Frame {
                    elapsed_time: active.input.time(),
                    delta_time,
                    size: (size.width, size.height),
                    input: &mut active.input,
                };

                let output = (self.callback)(&mut self.state, &mut frame);
                active.input.end_frame();

                if output.exit {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(active) = &mut self.active {
            active.input.handle_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(active) = &self.active {
            active.window.request_redraw();
        }
    }
}
