//! Recording stand-ins for the GL device and the window, used by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex, Once};

use glam::Vec4;

use crate::abs::{
    BufferTarget, Device, RasterMode, ShaderStage, VertexAttribute, Window, WindowEvent,
};

/// Polls a [`FakeWindow`] answers before it assumes the runner is stuck.
const MAX_POLLS: usize = 1000;

static CAPTURE: Once = Once::new();
static CAPTURED: Mutex<Vec<LogLine>> = Mutex::new(Vec::new());

/// A log record kept by the capturing logger.
#[derive(Debug, Clone)]
pub struct LogLine {
    thread: Option<String>,
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

/// Installs a fern dispatch that keeps every record in memory. Idempotent.
pub fn capture_logs() {
    CAPTURE.call_once(|| {
        let result = fern::Dispatch::new()
            .level(log::LevelFilter::Trace)
            .chain(fern::Output::call(|record| {
                let line = LogLine {
                    thread: std::thread::current().name().map(str::to_string),
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                };
                if let Ok(mut lines) = CAPTURED.lock() {
                    lines.push(line);
                }
            }))
            .apply();
        assert!(result.is_ok(), "another logger was installed first");
    });
}

/// Records logged so far by the calling test's thread.
pub fn logged_on_this_thread() -> Vec<LogLine> {
    let thread = std::thread::current().name().map(str::to_string);
    CAPTURED
        .lock()
        .map(|lines| {
            lines
                .iter()
                .filter(|line| line.thread == thread)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, Vec<u8>),
    DeleteBuffer(u32),
    VertexAttribute(VertexAttribute),
    Viewport(i32, i32, i32, i32),
    Clear(Vec4),
    PolygonMode(RasterMode),
    DrawArrays(i32, i32),
    DrawElements(i32),
}

#[derive(Default)]
struct DeviceState {
    calls: Vec<Call>,
    next_id: u32,
    live: HashSet<u32>,
    created: usize,
    deleted: usize,
    compiled: HashMap<u32, bool>,
    attached: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, bool>,
}

impl DeviceState {
    fn create(&mut self) -> u32 {
        self.next_id += 1;
        self.live.insert(self.next_id);
        self.created += 1;
        self.next_id
    }

    fn delete(&mut self, id: u32) {
        assert!(self.live.remove(&id), "object {id} deleted twice or never created");
        self.deleted += 1;
    }
}

/// A [`Device`] that records every call and checks object lifetimes.
///
/// A shader compiles when its source starts with a `#version` line and its braces balance. A
/// program links when every attached shader compiled.
#[derive(Default)]
pub struct FakeDevice {
    state: RefCell<DeviceState>,
}

impl FakeDevice {
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn created_objects(&self) -> usize {
        self.state.borrow().created
    }

    pub fn deleted_objects(&self) -> usize {
        self.state.borrow().deleted
    }

    /// Bytes uploaded to `target`, in upload order.
    pub fn uploads(&self, target: BufferTarget) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::BufferData(t, data) if *t == target => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Device for FakeDevice {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.state.borrow_mut().create();
        self.record(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) {
        let ok = source.starts_with("#version")
            && source.matches('{').count() == source.matches('}').count()
            && source.matches('(').count() == source.matches(')').count();
        let mut state = self.state.borrow_mut();
        state.compiled.insert(shader, ok);
        state.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().compiled.get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected end of file".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().delete(shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.state.borrow_mut().create();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.attached.entry(program).or_default().push(shader);
        state.calls.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(shaders) = state.attached.get_mut(&program) {
            shaders.retain(|s| *s != shader);
        }
        state.calls.push(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let shaders = state.attached.get(&program).cloned().unwrap_or_default();
        let ok = !shaders.is_empty()
            && shaders
                .iter()
                .all(|s| state.compiled.get(s).copied().unwrap_or(false));
        state.linked.insert(program, ok);
        state.calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.state.borrow_mut().delete(program);
        self.record(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.state.borrow_mut().create();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.state.borrow_mut().delete(vertex_array);
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.state.borrow_mut().create();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.state.borrow_mut().delete(buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute) {
        self.record(Call::VertexAttribute(attribute.clone()));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear(&self, color: Vec4) {
        self.record(Call::Clear(color));
    }

    fn polygon_mode(&self, mode: RasterMode) {
        self.record(Call::PolygonMode(mode));
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        self.record(Call::DrawArrays(first, count));
    }

    fn draw_elements(&self, count: i32) {
        self.record(Call::DrawElements(count));
    }
}

/// What a [`FakeWindow`] observed, shared with the test after the window moves into a runner.
#[derive(Debug, Default)]
pub struct WindowLog {
    pub should_close: bool,
    pub borderless: bool,
    pub presents: usize,
    pub polls: usize,
}

/// A [`Window`] that replays a script of event batches, one batch per poll.
pub struct FakeWindow {
    device: Arc<FakeDevice>,
    script: VecDeque<Vec<WindowEvent>>,
    log: Rc<RefCell<WindowLog>>,
    size: (u32, u32),
}

impl FakeWindow {
    pub fn new(device: &Arc<FakeDevice>, script: Vec<Vec<WindowEvent>>) -> Self {
        Self {
            device: Arc::clone(device),
            script: script.into(),
            log: Rc::new(RefCell::new(WindowLog::default())),
            size: (800, 600),
        }
    }

    pub fn log(&self) -> Rc<RefCell<WindowLog>> {
        Rc::clone(&self.log)
    }
}

impl Window for FakeWindow {
    type Device = FakeDevice;

    fn device(&self) -> &Arc<FakeDevice> {
        &self.device
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut log = self.log.borrow_mut();
        log.polls += 1;
        assert!(log.polls <= MAX_POLLS, "frame loop never observed a close");
        let events = self.script.pop_front().unwrap_or_default();
        for event in &events {
            if let WindowEvent::Resized(w, h) = *event {
                self.size = (w as u32, h as u32);
            }
        }
        events
    }

    fn should_close(&self) -> bool {
        self.log.borrow().should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.log.borrow_mut().should_close = value;
    }

    fn toggle_borderless_maximized(&mut self) -> bool {
        let mut log = self.log.borrow_mut();
        log.borderless = !log.borderless;
        log.borderless
    }

    fn present(&mut self) {
        self.log.borrow_mut().presents += 1;
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.size
    }
}
