//! Windowing abstraction.
//!
//! The frame loop only needs a handful of things from the windowing layer: a device to draw
//! with, a stream of events, a close flag and a way to present. [`Window`] captures that, and
//! [`App`](crate::abs::App) implements it over SDL2.

use std::sync::Arc;

use crate::abs::Device;

/// Keys the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F1,
    F2,
    F11,
}

/// An event delivered by [`Window::poll_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user or the window manager asked the window to close.
    CloseRequested,
    /// The drawable area changed size, in pixels.
    Resized(i32, i32),
    /// A key went down. Auto-repeat is not reported.
    KeyPressed(Key),
}

/// A window with a current graphics context.
pub trait Window {
    type Device: Device;

    /// The device bound to this window's context.
    fn device(&self) -> &Arc<Self::Device>;

    /// Drains the events that arrived since the last poll.
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Switches between a bordered window and a borderless maximized one. Returns whether the
    /// window is now borderless.
    fn toggle_borderless_maximized(&mut self) -> bool;

    /// Swaps the back buffer to the screen.
    fn present(&mut self);

    /// Size of the drawable area in pixels.
    fn drawable_size(&self) -> (u32, u32);
}
