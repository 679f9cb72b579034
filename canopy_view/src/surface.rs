// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The opaque drawing capability a [`View`](crate::View) renders through.

use canopy_scene::ViewSettings;
use kurbo::Size;

/// Backend hooks framing a render pass.
///
/// Implementations wrap the actual graphics context (an OpenGL viewport, a
/// GPU render target, a test recorder). The view calls these around actor
/// rendering; it never issues draw calls itself. All hooks default to no-ops
/// so partial backends stay easy to write.
pub trait RenderSurface {
    /// Called once before actors render, with the settings for this frame.
    ///
    /// Typical implementations clear the target and set up the projection
    /// for the frame.
    fn begin_frame(&mut self, settings: &ViewSettings) {
        let _ = settings;
    }

    /// Called once after all actors have rendered.
    fn end_frame(&mut self) {}

    /// Called when the viewport has been resized, with the new pixel size.
    fn resized(&mut self, size: Size) {
        let _ = size;
    }

    /// Writes the current frame to `path`.
    ///
    /// Returns `false` when the surface cannot capture (headless backends,
    /// I/O failure). The default implementation always fails.
    fn capture(&mut self, path: &str) -> bool {
        let _ = path;
        false
    }
}
