use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Target time between `on_frame` calls.
    pub frame_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "inkline".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            frame_interval: Duration::from_micros(16_667),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the app exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct WindowEntry {
    window: Window,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
}

struct AppState<A> {
    config: RuntimeConfig,
    app: A,
    entry: Option<WindowEntry>,
    next_frame: Instant,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            entry: None,
            next_frame: Instant::now(),
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.entry = Some(WindowEntry {
            window,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
        });
        Ok(())
    }

    /// Drives one frame and settles per-frame input afterwards.
    fn run_frame(&mut self) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        let time = entry.clock.tick();
        let control = {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: &entry.window },
                input: &entry.input_state,
                input_frame: &entry.input_frame,
                time,
            };
            self.app.on_frame(&mut ctx)
        };

        entry.input_state.end_frame();
        entry.input_frame.clear();
        control
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(entry) = &self.entry {
                entry.window.request_redraw();
            }
            self.next_frame = now + self.config.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(entry) = self.entry.as_mut() {
            if let Some(ev) = translate_window_event(&entry.window, &entry.input_state, &event) {
                entry.input_state.apply_event(&mut entry.input_frame, ev);
            }
        }

        let mut control = self.app.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => control = AppControl::Exit,
            WindowEvent::RedrawRequested if control == AppControl::Continue => {
                control = self.run_frame();
            }
            _ => {}
        }

        if control == AppControl::Exit {
            log::debug!("exit requested");
            self.exit_requested = true;
            self.entry = None;
            event_loop.exit();
        }
    }
}
