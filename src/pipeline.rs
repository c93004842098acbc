//! The shader program and geometry a lesson draws every frame.

use std::sync::Arc;

use crate::abs::{Device, DrawCall, Mesh, Shader, ShaderProgram, ShaderStage};
use crate::lesson::{FRAGMENT_SHADER, Lesson, VERTEX_SHADER};

/// A linked program plus the mesh it draws.
pub struct Pipeline<D: Device> {
    program: ShaderProgram<D>,
    mesh: Mesh<D>,
    healthy: bool,
}

impl<D: Device> Pipeline<D> {
    /// Builds the pipeline for `lesson` from the bundled shader sources.
    pub fn new(device: &Arc<D>, lesson: Lesson) -> Result<Self, String> {
        Self::with_sources(device, lesson, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Builds the pipeline from explicit shader sources.
    ///
    /// Compile and link errors are logged and the broken pipeline is returned anyway; drawing
    /// with it is harmless but shows nothing. Only object allocation failures are errors.
    pub fn with_sources(
        device: &Arc<D>,
        lesson: Lesson,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, String> {
        let mut healthy = true;

        let vert = Shader::new(device, ShaderStage::Vertex, vertex_source)?;
        let frag = Shader::new(device, ShaderStage::Fragment, fragment_source)?;
        for shader in [&vert, &frag] {
            if let Err(e) = shader.status() {
                log::error!("{e}");
                healthy = false;
            }
        }

        let program = ShaderProgram::new(device, &[&vert, &frag])?;
        if let Err(e) = program.status() {
            log::error!("{e}");
            healthy = false;
        }
        drop(vert);
        drop(frag);

        let mesh = Mesh::new(device, lesson.vertices(), lesson.indices())?;

        Ok(Self {
            program,
            mesh,
            healthy,
        })
    }

    /// Whether both stages compiled and the program linked.
    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    pub fn draw_call(&self) -> DrawCall {
        self.mesh.draw_call()
    }

    /// Binds the program and issues the mesh's draw call.
    pub fn draw(&self) {
        self.program.use_program();
        self.mesh.draw();
    }
}
