//! Graphics device abstraction.
//!
//! This module defines the [`Device`] trait, the slice of the OpenGL API the frame loop needs.
//! It is implemented for [`glow::Context`]; every method assumes the context is current on the
//! calling thread.

use glam::Vec4;
use glow::HasContext;

use crate::abs::{ShaderStage, VertexAttribute};

/// Binding point for a buffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex attribute data (`GL_ARRAY_BUFFER`).
    Array,
    /// Element indices (`GL_ELEMENT_ARRAY_BUFFER`).
    Element,
}

impl BufferTarget {
    fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::Element => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Whether triangles are rasterized filled or as outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterMode {
    #[default]
    Fill,
    Line,
}

/// The operations a render pipeline issues against the graphics device.
pub trait Device {
    type Shader: Copy;
    type Program: Copy;
    type Buffer: Copy;
    type VertexArray: Copy;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Sets the shader source and compiles it.
    fn compile_shader(&self, shader: Self::Shader, source: &str);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// Returns the full info log, sized to the length the implementation reports.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Uploads `data` with static usage to the buffer currently bound at `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Describes a float attribute of the bound array buffer and enables it.
    fn vertex_attribute(&self, attribute: &VertexAttribute);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear(&self, color: Vec4);
    fn polygon_mode(&self, mode: RasterMode);
    fn draw_arrays(&self, first: i32, count: i32);
    fn draw_elements(&self, count: i32);
}

impl Device for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
        }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target.gl_enum(), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.gl_enum(), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute) {
        unsafe {
            self.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                glow::FLOAT,
                false,
                attribute.stride,
                attribute.offset,
            );
            self.enable_vertex_attrib_array(attribute.location);
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn clear(&self, color: Vec4) {
        unsafe {
            self.clear_color(color.x, color.y, color.z, color.w);
            HasContext::clear(self, glow::COLOR_BUFFER_BIT);
        }
    }

    fn polygon_mode(&self, mode: RasterMode) {
        let mode = match mode {
            RasterMode::Fill => glow::FILL,
            RasterMode::Line => glow::LINE,
        };
        unsafe { HasContext::polygon_mode(self, glow::FRONT_AND_BACK, mode) }
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, first, count) }
    }

    fn draw_elements(&self, count: i32) {
        unsafe { HasContext::draw_elements(self, glow::TRIANGLES, count, glow::UNSIGNED_INT, 0) }
    }
}
