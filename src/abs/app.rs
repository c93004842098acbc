//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::fmt;
use std::sync::Arc;

use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

use crate::abs::{Key, Window, WindowEvent};
use crate::config::Config;

/// Why the window or its context could not be brought up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    Window(String),
    Loader(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Window(e) => write!(f, "Failed to create SDL window: {e}"),
            StartupError::Loader(e) => write!(f, "Failed to load OpenGL functions: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    should_close: bool,
    borderless: bool,
}

impl App {
    /// Creates a window as described by `config` and makes its OpenGL context current.
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let sdl = sdl2::init().map_err(StartupError::Window)?;
        let video_subsystem = sdl.video().map_err(StartupError::Window)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(config.gl_version[0], config.gl_version[1]);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| StartupError::Window(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(StartupError::Window)?;
        window
            .gl_make_current(&gl_context)
            .map_err(StartupError::Window)?;

        if video_subsystem.gl_get_proc_address("glGetString").is_null() {
            return Err(StartupError::Loader(
                "glGetString could not be resolved".to_string(),
            ));
        }
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        if config.vsync
            && let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync)
        {
            log::warn!("Could not enable vsync: {e}");
        }

        let event_pump = sdl.event_pump().map_err(StartupError::Window)?;
        let gl = Arc::new(gl);

        log::info!(
            "Created {}x{} window \"{}\" with OpenGL {}.{} core",
            config.width,
            config.height,
            config.title,
            config.gl_version[0],
            config.gl_version[1]
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
            should_close: false,
            borderless: false,
        })
    }
}

/// Maps the keys the frame loop understands.
pub fn translate_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Escape => Some(Key::Escape),
        Keycode::F1 => Some(Key::F1),
        Keycode::F2 => Some(Key::F2),
        Keycode::F11 => Some(Key::F11),
        _ => None,
    }
}

impl Window for App {
    type Device = glow::Context;

    fn device(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::CloseRequested),
                Event::Window {
                    win_event: SdlWindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = self.window.drawable_size();
                    events.push(WindowEvent::Resized(width as i32, height as i32));
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = translate_keycode(keycode) {
                        events.push(WindowEvent::KeyPressed(key));
                    }
                }
                _ => {}
            }
        }
        events
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn toggle_borderless_maximized(&mut self) -> bool {
        self.borderless = !self.borderless;
        if self.borderless {
            self.window.set_bordered(false);
            self.window.maximize();
        } else {
            self.window.set_bordered(true);
            self.window.restore();
        }
        self.borderless
    }

    fn present(&mut self) {
        self.window.gl_swap_window();
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
