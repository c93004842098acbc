//! The drawable region of a window.

use std::sync::Arc;

use crate::abs::Device;

/// Owns the viewport and keeps it in step with the window's drawable size.
///
/// A freshly created context's default viewport already covers the initial drawable, so
/// nothing is issued until the first resize.
pub struct RenderSurface<D: Device> {
    device: Arc<D>,
}

impl<D: Device> RenderSurface<D> {
    pub fn new(device: &Arc<D>) -> Self {
        Self {
            device: Arc::clone(device),
        }
    }

    /// Resizes the viewport to cover the whole new drawable area.
    pub fn resize(&self, width: i32, height: i32) {
        self.device.viewport(0, 0, width, height);
    }
}
