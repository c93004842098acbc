//! This module contains the thin layer over SDL2 and OpenGL the frame loop is written against,
//! including application setup, the device and window traits, shader management and meshes.

pub mod app;
pub mod device;
pub mod mesh;
pub mod shader;
pub mod surface;
pub mod window;

#[cfg(test)]
pub mod fake;

pub use app::*;
pub use device::*;
pub use mesh::*;
pub use shader::*;
pub use surface::*;
pub use window::*;
