//! Hello-triangle OpenGL exercises.
//!
//! A window is opened with an OpenGL 3.3 core context, a fixed vertex/fragment shader pair and
//! one mesh are uploaded, and [`runner::FrameRunner`] clears, draws and presents until the window
//! is closed.

pub mod abs;
pub mod config;
pub mod lesson;
pub mod logging;
pub mod pipeline;
pub mod runner;
