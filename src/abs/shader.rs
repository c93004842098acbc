//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! Compilation and linking never fail the constructors: the outcome is kept on the object and
//! exposed through `status()`, so callers decide whether a broken stage is fatal.

use std::fmt;
use std::sync::Arc;

use crate::abs::Device;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

/// A failed compile or link, with the diagnostic reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed:\n{log}")
            }
            BuildError::Link { log } => write!(f, "Shader program linking failed:\n{log}"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Represents an individual OpenGL shader.
pub struct Shader<D: Device> {
    device: Arc<D>,
    id: D::Shader,
    status: Result<(), BuildError>,
}

impl<D: Device> Shader<D> {
    /// Compiles a new shader from the given source code.
    ///
    /// Only a failure to allocate the shader object is returned as an error. A compile error
    /// leaves a shader object behind and is reported by [`Shader::status`].
    pub fn new(device: &Arc<D>, stage: ShaderStage, source: &str) -> Result<Self, String> {
        let id = device.create_shader(stage)?;
        device.compile_shader(id, source);

        let status = if device.shader_compile_status(id) {
            Ok(())
        } else {
            Err(BuildError::Compile {
                stage,
                log: device.shader_info_log(id),
            })
        };

        Ok(Self {
            device: Arc::clone(device),
            id,
            status,
        })
    }

    /// The compile outcome.
    pub fn status(&self) -> Result<(), &BuildError> {
        self.status.as_ref().copied()
    }
}

impl<D: Device> Drop for Shader<D> {
    fn drop(&mut self) {
        self.device.delete_shader(self.id);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram<D: Device> {
    device: Arc<D>,
    id: D::Program,
    status: Result<(), BuildError>,
}

impl<D: Device> ShaderProgram<D> {
    /// Links a new shader program from the given shaders.
    ///
    /// As with [`Shader::new`], a link error is kept in [`ShaderProgram::status`] and the
    /// program object stays alive.
    pub fn new(device: &Arc<D>, shaders: &[&Shader<D>]) -> Result<Self, String> {
        let program = device.create_program()?;

        for shader in shaders {
            device.attach_shader(program, shader.id);
        }

        device.link_program(program);

        let status = if device.program_link_status(program) {
            Ok(())
        } else {
            Err(BuildError::Link {
                log: device.program_info_log(program),
            })
        };

        for shader in shaders {
            device.detach_shader(program, shader.id);
        }

        Ok(Self {
            device: Arc::clone(device),
            id: program,
            status,
        })
    }

    /// The link outcome.
    pub fn status(&self) -> Result<(), &BuildError> {
        self.status.as_ref().copied()
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.device.use_program(Some(self.id));
    }
}

impl<D: Device> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.device.delete_program(self.id);
    }
}
