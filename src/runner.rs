//! The frame loop.
//!
//! [`FrameRunner`] owns a window, builds the lesson's pipeline once and then polls, clears,
//! draws and presents until the window's close flag is set.

use glam::Vec4;

use crate::abs::{Device, Key, RasterMode, RenderSurface, StartupError, Window, WindowEvent};
use crate::lesson::{FRAGMENT_SHADER, Lesson, VERTEX_SHADER};
use crate::pipeline::Pipeline;

/// Lifecycle of a [`FrameRunner`]. States are only ever entered in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunnerState {
    Uninitialized,
    ContextReady,
    PipelineReady,
    Looping,
    Terminated,
}

/// Acquires a window, runs `lesson` on it until it closes and returns the process status: `0`
/// after a normal run, `-1` if the window, its context or the pipeline objects could not be
/// created.
pub fn launch<W, F>(acquire: F, lesson: Lesson, clear_color: Vec4) -> i32
where
    W: Window,
    F: FnOnce() -> Result<W, StartupError>,
{
    log::debug!("Runner state: {:?}", RunnerState::Uninitialized);
    let window = match acquire() {
        Ok(window) => window,
        Err(e) => {
            log::error!("{e}");
            return -1;
        }
    };

    let mut runner = FrameRunner::new(window, lesson, clear_color);
    if let Err(e) = runner.setup() {
        log::error!("Pipeline setup failed: {e}");
        return -1;
    }
    runner.run();
    0
}

pub struct FrameRunner<W: Window> {
    // Dropped before the window so GL objects go while the context is alive.
    pipeline: Option<Pipeline<W::Device>>,
    surface: RenderSurface<W::Device>,
    window: W,
    lesson: Lesson,
    clear_color: Vec4,
    vertex_source: String,
    fragment_source: String,
    raster_mode: RasterMode,
    pending_keys: Vec<Key>,
    state: RunnerState,
    frames: u64,
}

impl<W: Window> FrameRunner<W> {
    /// Takes over a window whose context is already current.
    pub fn new(window: W, lesson: Lesson, clear_color: Vec4) -> Self {
        let (width, height) = window.drawable_size();
        log::debug!("Initial drawable size {width}x{height}");
        let surface = RenderSurface::new(window.device());

        Self {
            pipeline: None,
            surface,
            window,
            lesson,
            clear_color,
            vertex_source: VERTEX_SHADER.to_string(),
            fragment_source: FRAGMENT_SHADER.to_string(),
            raster_mode: RasterMode::default(),
            pending_keys: Vec::new(),
            state: RunnerState::ContextReady,
            frames: 0,
        }
    }

    /// Replaces the bundled shader sources. Must be called before [`FrameRunner::setup`].
    pub fn with_shader_sources(mut self, vertex: &str, fragment: &str) -> Self {
        self.vertex_source = vertex.to_string();
        self.fragment_source = fragment.to_string();
        self
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn raster_mode(&self) -> RasterMode {
        self.raster_mode
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the pipeline compiled and linked cleanly.
    pub fn pipeline_healthy(&self) -> bool {
        self.pipeline.as_ref().is_some_and(Pipeline::is_healthy)
    }

    /// Builds the pipeline and uploads the lesson's geometry.
    ///
    /// Shader errors are logged and do not fail setup; only a device refusing to create objects
    /// does.
    pub fn setup(&mut self) -> Result<(), String> {
        if self.state != RunnerState::ContextReady {
            return Err(format!("setup called in state {:?}", self.state));
        }

        let pipeline = Pipeline::with_sources(
            self.window.device(),
            self.lesson,
            &self.vertex_source,
            &self.fragment_source,
        )?;
        if !pipeline.is_healthy() {
            log::warn!("Continuing with a broken pipeline, nothing will be drawn");
        }
        log::debug!("Pipeline ready, {:?}", pipeline.draw_call());
        self.pipeline = Some(pipeline);
        self.state = RunnerState::PipelineReady;
        Ok(())
    }

    /// Runs frames until the window is asked to close, then releases the pipeline.
    ///
    /// Sets the pipeline up first if [`FrameRunner::setup`] has not been called.
    pub fn run(mut self) {
        if self.state == RunnerState::ContextReady
            && let Err(e) = self.setup()
        {
            log::error!("Pipeline setup failed: {e}");
            self.terminate();
            return;
        }

        log::info!("Entering frame loop for {:?}", self.lesson);
        while !self.window.should_close() {
            self.frame();
        }
        self.terminate();
    }

    /// One iteration of the loop: input, clear, draw, present, poll.
    ///
    /// Does nothing until the pipeline is set up.
    fn frame(&mut self) {
        if self.state < RunnerState::PipelineReady {
            log::warn!("Frame requested in state {:?}, skipping", self.state);
            return;
        }
        if self.state == RunnerState::PipelineReady {
            self.state = RunnerState::Looping;
        }

        self.process_input();

        let device = self.window.device();
        device.clear(self.clear_color);
        if let Some(pipeline) = &self.pipeline {
            pipeline.draw();
        }

        self.window.present();
        self.frames += 1;

        self.poll_events();
    }

    fn process_input(&mut self) {
        for key in std::mem::take(&mut self.pending_keys) {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.window.set_should_close(true),
            Key::F11 => {
                let borderless = self.window.toggle_borderless_maximized();
                log::debug!("Borderless maximized: {borderless}");
            }
            Key::F1 if self.lesson.supports_raster_toggle() => {
                self.set_raster_mode(RasterMode::Fill)
            }
            Key::F2 if self.lesson.supports_raster_toggle() => {
                self.set_raster_mode(RasterMode::Line)
            }
            Key::F1 | Key::F2 => {}
        }
    }

    fn set_raster_mode(&mut self, mode: RasterMode) {
        self.raster_mode = mode;
        self.window.device().polygon_mode(mode);
    }

    fn poll_events(&mut self) {
        for event in self.window.poll_events() {
            match event {
                WindowEvent::CloseRequested => self.window.set_should_close(true),
                WindowEvent::Resized(width, height) => {
                    log::trace!("Resized to {width}x{height}");
                    self.surface.resize(width, height);
                }
                WindowEvent::KeyPressed(key) => self.pending_keys.push(key),
            }
        }
    }

    fn terminate(&mut self) {
        self.pipeline = None;
        self.state = RunnerState::Terminated;
        log::info!("Presented {} frames", self.frames);
    }
}
