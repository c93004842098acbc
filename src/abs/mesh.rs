//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing static mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glam::Vec3;

use crate::abs::{BufferTarget, Device};

/// Layout of one float attribute inside a vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the attribute inside a vertex.
    pub offset: i32,
}

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// The attributes making up one vertex.
    fn attributes() -> Vec<VertexAttribute>;
}

/// Bare positions: three tightly packed floats at location 0.
impl Vertex for Vec3 {
    fn attributes() -> Vec<VertexAttribute> {
        vec![VertexAttribute {
            location: 0,
            components: 3,
            stride: std::mem::size_of::<Vec3>() as i32,
            offset: 0,
        }]
    }
}

/// The single draw a mesh issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Draw `count` vertices in buffer order.
    Arrays { count: i32 },
    /// Draw `count` vertices through the index buffer.
    Elements { count: i32 },
}

/// Represents a mesh stored on the GPU side.
///
/// The data is uploaded once when the mesh is created and never changes.
pub struct Mesh<D: Device> {
    device: Arc<D>,
    vao: D::VertexArray,
    vbo: D::Buffer,
    ebo: Option<D::Buffer>,
    draw_call: DrawCall,
}

impl<D: Device> Mesh<D> {
    /// Creates a new mesh from the given vertex data and, for indexed meshes, index data.
    pub fn new<V: Vertex>(
        device: &Arc<D>,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) -> Result<Self, String> {
        let vao = device.create_vertex_array()?;
        let vbo = match device.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                device.delete_vertex_array(vao);
                return Err(e);
            }
        };
        let ebo = match indices.map(|_| device.create_buffer()).transpose() {
            Ok(ebo) => ebo,
            Err(e) => {
                device.delete_buffer(vbo);
                device.delete_vertex_array(vao);
                return Err(e);
            }
        };

        device.bind_vertex_array(Some(vao));

        device.bind_buffer(BufferTarget::Array, Some(vbo));
        device.buffer_data(BufferTarget::Array, bytemuck::cast_slice(vertices));

        if let (Some(ebo), Some(indices)) = (ebo, indices) {
            device.bind_buffer(BufferTarget::Element, Some(ebo));
            device.buffer_data(BufferTarget::Element, bytemuck::cast_slice(indices));
        }

        for attribute in V::attributes() {
            device.vertex_attribute(&attribute);
        }

        device.bind_vertex_array(None);
        device.bind_buffer(BufferTarget::Array, None);
        if ebo.is_some() {
            device.bind_buffer(BufferTarget::Element, None);
        }

        let draw_call = match indices {
            Some(indices) => DrawCall::Elements {
                count: indices.len() as i32,
            },
            None => DrawCall::Arrays {
                count: vertices.len() as i32,
            },
        };

        Ok(Self {
            device: Arc::clone(device),
            vao,
            vbo,
            ebo,
            draw_call,
        })
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        self.device.bind_vertex_array(Some(self.vao));
        match self.draw_call {
            DrawCall::Arrays { count } => self.device.draw_arrays(0, count),
            DrawCall::Elements { count } => self.device.draw_elements(count),
        }
        self.device.bind_vertex_array(None);
    }

    pub fn draw_call(&self) -> DrawCall {
        self.draw_call
    }
}

impl<D: Device> Drop for Mesh<D> {
    fn drop(&mut self) {
        self.device.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.device.delete_buffer(ebo);
        }
        self.device.delete_vertex_array(self.vao);
    }
}
