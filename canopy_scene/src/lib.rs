// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_scene --heading-base-level=0

//! Canopy Scene: layer-stack primitives for georeferenced 2D viewers.
//!
//! This crate provides the headless model behind a layered raster/vector
//! viewer: a keyed registry of renderable *actors*, a mutable rendering
//! order over those actors, and the [`ViewSettings`] describing the current
//! viewport. It focuses on:
//! - Actor lifecycle: insertion (with generated or explicit keys), removal,
//!   and lookup through an opaque string key.
//! - Rendering order management: bring-to-front/send-to-back, neighbor
//!   swaps, cyclic rotation, and bulk reordering.
//! - Extent aggregation over base or overlay layers.
//! - Viewport state: center, signed per-axis spacing, and fit-to-viewport
//!   scale computation.
//!
//! It does **not** perform any drawing or I/O. Callers are expected to:
//! - Implement [`Actor`] (and optionally [`GeoTransform`]) on their own
//!   layer types, backed by whatever pixel pipeline they use.
//! - Drive render passes and zoom computations from a higher layer (see the
//!   `canopy_view` crate).
//! - Serialize access externally; the scene is a plain owned value with no
//!   internal locking.
//!
//! ## Minimal example
//!
//! ```rust
//! use canopy_scene::{Actor, Placement, Scene};
//! use kurbo::Rect;
//!
//! struct Layer(Rect);
//!
//! impl Actor for Layer {
//!     fn extent(&self) -> Rect {
//!         self.0
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let base = scene.insert(Box::new(Layer(Rect::new(0.0, 0.0, 100.0, 50.0))));
//! let roads = scene.insert(Box::new(Layer(Rect::new(10.0, 10.0, 60.0, 40.0))));
//!
//! // The most recently inserted layer starts at the back; raise it.
//! scene.move_to_end_of_rendering_order(&roads, Placement::Front);
//! assert_eq!(scene.rendering_order(), [roads.clone(), base.clone()]);
//!
//! // Union extent over base (non-overlay) layers.
//! let (count, extent) = scene.extent(false);
//! assert_eq!(count, 2);
//! assert_eq!(extent, Rect::new(0.0, 0.0, 100.0, 50.0));
//! ```
//!
//! ## Design notes
//!
//! - Keys are plain strings; the scene generates collision-free keys when
//!   the caller does not provide one.
//! - The rendering order is always a permutation of the registry's key set.
//!   Every mutating operation preserves this; there is no way to observe a
//!   dangling or duplicated key.
//! - The first key in the rendering order is the **topmost** layer; render
//!   passes walk the order back to front.
//! - Geo-referencing is an optional capability queried through
//!   [`Actor::geo`], never through downcasting.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod actor;
mod scene;
mod settings;

pub use actor::{Actor, ActorFlags, GeoTransform};
pub use scene::{Placement, Scene, Shift};
pub use settings::ViewSettings;
