// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_view --heading-base-level=0

//! Canopy View: the view engine over a Canopy layer stack.
//!
//! This crate composes a [`canopy_scene::Scene`] with
//! [`canopy_scene::ViewSettings`] into a [`View`] and adds the two things a
//! scene alone does not have:
//! - A render-pass driver: light and heavy passes over the rendering order,
//!   framed by an opaque [`RenderSurface`] capability (the seam where real
//!   GPU work lives).
//! - The zoom and reprojection computations that translate between the
//!   viewport reference space and actor-native spaces: fit a region, fit
//!   all base layers, fit one layer, restore a layer's native 1:1 scale,
//!   and reproject the current view into an actor's coordinate system.
//!
//! Zoom computations are pure functions of the current scene and settings;
//! they return a new `(center, spacing)` pair and leave it to the caller to
//! apply the result to the settings. Failure (unknown key, missing
//! geo-referencing capability, or a failing transform) is `None` — there is
//! no partially-written output to misread.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_scene::Actor;
//! use canopy_view::View;
//! use kurbo::{Rect, Size, Vec2};
//!
//! struct Layer(Rect);
//!
//! impl Actor for Layer {
//!     fn extent(&self) -> Rect {
//!         self.0
//!     }
//! }
//!
//! let mut view = View::new();
//! view.initialize(Size::new(800.0, 600.0));
//! view.scene_mut().insert(Box::new(Layer(Rect::new(0.0, 0.0, 400.0, 300.0))));
//!
//! // Fit every base layer, keeping the reference layer's axis orientation.
//! let native = Vec2::new(1.0, -1.0);
//! let (center, spacing) = view.zoom_to_extent(native).unwrap();
//! view.settings_mut().set_center(center);
//! view.settings_mut().set_spacing(spacing);
//! assert!(spacing.y < 0.0);
//! ```
//!
//! ## Design notes
//!
//! - The engine is synchronous and single-threaded; render passes and
//!   registry mutations must be serialized by the owner (typically the
//!   event loop that owns the window).
//! - Spacing signs produced by zoom computations are copied from a *native*
//!   sign reference rather than recomputed from transforms. This
//!   deliberately suppresses rotation-induced axis flips; see the method
//!   docs on [`View`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod surface;
mod view;

pub use surface::RenderSurface;
pub use view::{PROBE_DISTANCE, View};
