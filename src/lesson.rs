//! The exercise variants and the fixed data each one draws.

use glam::{Vec3, vec3};
use serde::{Deserialize, Serialize};

pub const VERTEX_SHADER: &str = include_str!("shaders/basic/vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/basic/frag.glsl");

const TRIANGLE: [Vec3; 3] = [
    vec3(0.0, 0.5, 0.0),   // top
    vec3(-0.5, -0.5, 0.0), // bottom left
    vec3(0.5, -0.5, 0.0),  // bottom right
];

const RECTANGLE: [Vec3; 4] = [
    vec3(0.5, 0.5, 0.0),   // top right
    vec3(0.5, -0.5, 0.0),  // bottom right
    vec3(-0.5, -0.5, 0.0), // bottom left
    vec3(-0.5, 0.5, 0.0),  // top left
];

#[rustfmt::skip]
const RECTANGLE_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Which exercise to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lesson {
    /// One triangle drawn straight from the vertex buffer.
    Triangle,
    /// A rectangle built from two triangles sharing vertices through an index buffer, with
    /// switchable wireframe.
    #[default]
    Rectangle,
}

impl Lesson {
    pub fn vertices(self) -> &'static [Vec3] {
        match self {
            Lesson::Triangle => &TRIANGLE,
            Lesson::Rectangle => &RECTANGLE,
        }
    }

    pub fn indices(self) -> Option<&'static [u32]> {
        match self {
            Lesson::Triangle => None,
            Lesson::Rectangle => Some(&RECTANGLE_INDICES),
        }
    }

    /// Whether F1/F2 switch between filled and wireframe rendering.
    pub fn supports_raster_toggle(self) -> bool {
        matches!(self, Lesson::Rectangle)
    }
}
